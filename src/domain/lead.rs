// src/domain/lead.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::interest::BuyerContact;

/// Lead progression. The built-in flows use the named states; any other
/// label an agent types is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    New,
    Contacted,
    MeetingScheduled,
    SiteVisit,
    Negotiation,
    ClosedWon,
    ClosedLost,
    Other(String),
}

impl LeadStatus {
    pub const CANONICAL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::MeetingScheduled,
        LeadStatus::SiteVisit,
        LeadStatus::Negotiation,
        LeadStatus::ClosedWon,
        LeadStatus::ClosedLost,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::MeetingScheduled => "Meeting Scheduled",
            LeadStatus::SiteVisit => "Site Visit",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::ClosedWon => "Closed Won",
            LeadStatus::ClosedLost => "Closed Lost",
            LeadStatus::Other(s) => s,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, LeadStatus::ClosedWon | LeadStatus::ClosedLost)
    }
}

impl From<&str> for LeadStatus {
    fn from(s: &str) -> Self {
        match s {
            "New" => LeadStatus::New,
            "Contacted" => LeadStatus::Contacted,
            "Meeting Scheduled" => LeadStatus::MeetingScheduled,
            "Site Visit" => LeadStatus::SiteVisit,
            "Negotiation" => LeadStatus::Negotiation,
            "Closed Won" => LeadStatus::ClosedWon,
            "Closed Lost" => LeadStatus::ClosedLost,
            other => LeadStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for LeadStatus {
    fn from(s: String) -> Self {
        LeadStatus::from(s.as_str())
    }
}

impl From<LeadStatus> for String {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::Other(s) => s,
            named => named.as_str().to_string(),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub interest_id: String,
    pub property_id: String,
    pub buyer_id: String,
    pub marketer_id: String,
    pub developer_id: String,
    pub status: LeadStatus,
    pub buyer_contact: BuyerContact,
    pub approved_at: DateTime<Utc>,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deal_value: Option<f64>,
}

impl Lead {
    pub fn is_assigned_to(&self, account_id: &str) -> bool {
        self.marketer_id == account_id || self.developer_id == account_id
    }
}

/// One row of a lead's append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadHistoryEntry {
    pub id: String,
    pub lead_id: String,
    pub status: LeadStatus,
    pub updated_by: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Redacted view of a lead for listing pages: no phone or email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSummary {
    pub name: String,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}
