// src/domain/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::password::PasswordHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Marketer,
    Developer,
    Buyer,
}

impl Role {
    /// Marketers and developers own listings and work leads.
    pub fn is_agent(self) -> bool {
        matches!(self, Role::Marketer | Role::Developer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Inactive,
            AccountStatus::Inactive => AccountStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: PasswordHash,
    pub role: Role,
    #[serde(default)]
    pub status: AccountStatus,
    /// 0–100, only meaningful for buyers.
    #[serde(default)]
    pub buyer_score: u8,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// What a visitor fills in on the signup form.
#[derive(Debug, Clone, Default)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Option<Role>,
    /// One of `"0-500k"`, `"500k-1m"`, `"1m+"`.
    pub budget: Option<String>,
    pub preferred_location: Option<String>,
}

/// What an admin fills in when adding a user by hand.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

/// Initial buyer score from the signup profile.
///
/// Base 50, +30/+20/+10 for the `1m+`/`500k-1m`/`0-500k` budget tiers,
/// +10 when a preferred location is given, capped at 100.
pub fn buyer_score(budget: Option<&str>, preferred_location: Option<&str>) -> u8 {
    let mut score: u8 = 50;
    score += match budget {
        Some("1m+") => 30,
        Some("500k-1m") => 20,
        Some("0-500k") => 10,
        _ => 0,
    };
    if preferred_location.is_some_and(|l| !l.is_empty()) {
        score += 10;
    }
    score.min(100)
}
