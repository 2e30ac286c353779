// src/domain/interest.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestStatus {
    New,
    Approved,
    Rejected,
    #[serde(rename = "Sent Back")]
    SentBack,
}

impl InterestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InterestStatus::New => "New",
            InterestStatus::Approved => "Approved",
            InterestStatus::Rejected => "Rejected",
            InterestStatus::SentBack => "Sent Back",
        }
    }

    /// Everything but `Rejected` blocks another interest from the same buyer
    /// on the same property, `Sent Back` included.
    pub fn is_active(self) -> bool {
        self != InterestStatus::Rejected
    }
}

/// Buyer contact details captured when the interest (and later the lead)
/// was created; later profile edits do not flow into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl BuyerContact {
    pub fn snapshot(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub id: String,
    pub buyer_id: String,
    pub property_id: String,
    #[serde(default)]
    pub message: String,
    pub buyer_contact: BuyerContact,
    pub source: String,
    pub status: InterestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub decision_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub decision_reason: Option<String>,
}

impl Interest {
    /// Record an admin decision.
    pub fn decide(&mut self, status: InterestStatus, reason: Option<String>, at: DateTime<Utc>) {
        self.status = status;
        self.decision_at = Some(at);
        self.decision_reason = reason;
    }
}

#[derive(Debug, Clone, Default)]
pub struct InterestFilter {
    pub status: Option<InterestStatus>,
}
