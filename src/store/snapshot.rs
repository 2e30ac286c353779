// src/store/snapshot.rs
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::db::collections::{read_payload, CollectionKey};
use crate::domain::account::Account;
use crate::domain::commission::CommissionClaim;
use crate::domain::interest::Interest;
use crate::domain::lead::{Lead, LeadHistoryEntry};
use crate::domain::property::Property;
use crate::errors::StoreError;
use crate::sync::CollectionUpdate;

/// Everything a handle currently believes, one cell per collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub session: Option<Account>,
    pub accounts: Vec<Account>,
    pub properties: Vec<Property>,
    pub interests: Vec<Interest>,
    pub leads: Vec<Lead>,
    pub lead_history: Vec<LeadHistoryEntry>,
    pub claims: Vec<CommissionClaim>,
}

impl Snapshot {
    /// Read every key; absent keys start empty.
    pub fn load(conn: &Connection) -> Result<Self, StoreError> {
        let session = match read_payload(conn, CollectionKey::Session)? {
            Some(json) => serde_json::from_str(&json)?,
            None => None,
        };

        Ok(Self {
            session,
            accounts: load_vec(conn, CollectionKey::Accounts)?,
            properties: load_vec(conn, CollectionKey::Properties)?,
            interests: load_vec(conn, CollectionKey::Interests)?,
            leads: load_vec(conn, CollectionKey::Leads)?,
            lead_history: load_vec(conn, CollectionKey::LeadHistory)?,
            claims: load_vec(conn, CollectionKey::CommissionClaims)?,
        })
    }

    /// Replace the cell the update targets.
    pub fn apply(&mut self, update: CollectionUpdate) {
        match update {
            CollectionUpdate::Accounts(v) => self.accounts = v,
            CollectionUpdate::Properties(v) => self.properties = v,
            CollectionUpdate::Interests(v) => self.interests = v,
            CollectionUpdate::Leads(v) => self.leads = v,
            CollectionUpdate::LeadHistory(v) => self.lead_history = v,
            CollectionUpdate::CommissionClaims(v) => self.claims = v,
        }
    }
}

fn load_vec<T: DeserializeOwned>(conn: &Connection, key: CollectionKey) -> Result<Vec<T>, StoreError> {
    match read_payload(conn, key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

impl CollectionUpdate {
    pub fn key(&self) -> CollectionKey {
        match self {
            CollectionUpdate::Accounts(_) => CollectionKey::Accounts,
            CollectionUpdate::Properties(_) => CollectionKey::Properties,
            CollectionUpdate::Interests(_) => CollectionKey::Interests,
            CollectionUpdate::Leads(_) => CollectionKey::Leads,
            CollectionUpdate::LeadHistory(_) => CollectionKey::LeadHistory,
            CollectionUpdate::CommissionClaims(_) => CollectionKey::CommissionClaims,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            CollectionUpdate::Accounts(v) => serde_json::to_string(v),
            CollectionUpdate::Properties(v) => serde_json::to_string(v),
            CollectionUpdate::Interests(v) => serde_json::to_string(v),
            CollectionUpdate::Leads(v) => serde_json::to_string(v),
            CollectionUpdate::LeadHistory(v) => serde_json::to_string(v),
            CollectionUpdate::CommissionClaims(v) => serde_json::to_string(v),
        }
    }

    /// Same update with inline image payloads dropped. Only listings carry
    /// images; other collections come back unchanged.
    pub fn without_inline_images(&self) -> CollectionUpdate {
        match self {
            CollectionUpdate::Properties(v) => {
                CollectionUpdate::Properties(v.iter().map(Property::without_inline_images).collect())
            }
            other => other.clone(),
        }
    }
}
