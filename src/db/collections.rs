// src/db/collections.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Storage keys, one JSON document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKey {
    #[serde(rename = "user")]
    Session,
    #[serde(rename = "mockUsers")]
    Accounts,
    #[serde(rename = "properties")]
    Properties,
    #[serde(rename = "leads")]
    Leads,
    #[serde(rename = "interests")]
    Interests,
    #[serde(rename = "leadStatusHistory")]
    LeadHistory,
    #[serde(rename = "commissionClaims")]
    CommissionClaims,
}

impl CollectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Session => "user",
            CollectionKey::Accounts => "mockUsers",
            CollectionKey::Properties => "properties",
            CollectionKey::Leads => "leads",
            CollectionKey::Interests => "interests",
            CollectionKey::LeadHistory => "leadStatusHistory",
            CollectionKey::CommissionClaims => "commissionClaims",
        }
    }
}

/// Raw JSON stored under `key`, if any.
pub fn read_payload(conn: &Connection, key: CollectionKey) -> Result<Option<String>, StoreError> {
    conn.query_row(
        "select payload from collections where key = ?",
        params![key.as_str()],
        |r| r.get(0),
    )
    .optional()
    .map_err(|e| StoreError::Db(format!("select {} failed: {e}", key.as_str())))
}

/// Bytes held by every key except `excluded`.
fn bytes_used_excluding(conn: &Connection, excluded: &[&str]) -> Result<usize, StoreError> {
    let mut stmt = conn
        .prepare("select key, length(cast(payload as blob)) from collections")
        .map_err(|e| StoreError::Db(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
        .map_err(|e| StoreError::Db(e.to_string()))?;

    let mut total = 0usize;
    for r in rows {
        let (key, len) = r.map_err(|e| StoreError::Db(e.to_string()))?;
        if !excluded.contains(&key.as_str()) {
            total += len.max(0) as usize;
        }
    }
    Ok(total)
}

/// Replace several documents at once. Either every key is written or none:
/// the quota is checked against the whole batch and the writes share one
/// transaction.
pub fn write_batch(
    conn: &mut Connection,
    entries: &[(CollectionKey, String)],
    quota_bytes: usize,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    let incoming: usize = entries.iter().map(|(_, p)| p.len()).sum();
    let needed = bytes_used_excluding(conn, &keys)? + incoming;
    if needed > quota_bytes {
        return Err(StoreError::QuotaExceeded {
            needed,
            quota: quota_bytes,
        });
    }

    let tx = conn
        .transaction()
        .map_err(|e| StoreError::Db(format!("begin tx failed: {e}")))?;

    for (key, payload) in entries {
        tx.execute(
            r#"
            insert into collections (key, payload, updated_at)
            values (?1, ?2, ?3)
            on conflict(key) do update set
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
            params![key.as_str(), payload, now],
        )
        .map_err(|e| StoreError::Db(format!("write {} failed: {e}", key.as_str())))?;
    }

    tx.commit()
        .map_err(|e| StoreError::Db(format!("commit tx failed: {e}")))?;
    Ok(())
}

pub fn write_payload(
    conn: &mut Connection,
    key: CollectionKey,
    payload: String,
    quota_bytes: usize,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    write_batch(conn, &[(key, payload)], quota_bytes, now)
}

pub fn delete_payload(conn: &Connection, key: CollectionKey) -> Result<(), StoreError> {
    conn.execute("delete from collections where key = ?", params![key.as_str()])
        .map_err(|e| StoreError::Db(format!("delete {} failed: {e}", key.as_str())))?;
    Ok(())
}
