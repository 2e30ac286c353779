// src/domain/commission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionPolicy {
    /// `deal_value * percentage / 100`
    #[default]
    Percentage,
    /// The configured value is paid as-is, whatever the deal value.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionSettings {
    pub percentage: f64,
    #[serde(rename = "type")]
    pub policy: CommissionPolicy,
}

impl Default for CommissionSettings {
    fn default() -> Self {
        Self {
            percentage: 2.5,
            policy: CommissionPolicy::Percentage,
        }
    }
}

impl CommissionSettings {
    /// A rate that survives a JSON round trip: finite and not negative.
    pub fn is_valid(&self) -> bool {
        self.percentage.is_finite() && self.percentage >= 0.0
    }

    pub fn amount_for(&self, deal_value: f64) -> f64 {
        match self.policy {
            CommissionPolicy::Percentage => deal_value * self.percentage / 100.0,
            CommissionPolicy::Fixed => self.percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[serde(rename = "Pending Admin Review")]
    PendingAdminReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionClaim {
    pub id: String,
    pub lead_id: String,
    pub property_id: String,
    pub marketer_id: String,
    pub buyer_id: String,
    pub deal_value: f64,
    pub commission_percentage: f64,
    /// Fixed at creation; never recomputed when settings change.
    pub commission_amount: f64,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub decision_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub decision_reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub marketer_id: Option<String>,
}

impl ClaimFilter {
    pub fn matches(&self, claim: &CommissionClaim) -> bool {
        self.status.map_or(true, |s| claim.status == s)
            && self
                .marketer_id
                .as_deref()
                .map_or(true, |m| claim.marketer_id == m)
    }
}
