//! In-memory snapshot of every collection, backed by the key-value store and
//! kept loosely in step with other handles through the [`SyncBus`].
//!
//! A mutation replaces whole collections: the local snapshot first, then a
//! broadcast to other handles, then the database write. Handles that write
//! concurrently overwrite each other; the last write wins.

pub mod snapshot;

use std::sync::mpsc::Receiver;

use chrono::Utc;

use crate::auth::token::new_id;
use crate::db::collections::{delete_payload, write_batch, write_payload, CollectionKey};
use crate::db::connection::{init_db, Database};
use crate::domain::account::Account;
use crate::errors::{StoreError, StoreResult};
use crate::sync::{CollectionUpdate, SyncBus, SyncMessage};

pub use snapshot::Snapshot;

/// Persistence degraded but the operation itself went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageWarning {
    /// Saved, but inline images were dropped to fit the quota.
    ImagesDropped,
    /// Nothing was saved; the change lives in memory only.
    DataWillBeLost,
}

impl StorageWarning {
    pub fn message(self) -> &'static str {
        match self {
            StorageWarning::ImagesDropped => "Storage full! Property saved WITHOUT image.",
            StorageWarning::DataWillBeLost => "Critical: Storage full. Data will be lost on refresh.",
        }
    }
}

pub struct Store {
    db: Database,
    bus: SyncBus,
    origin: String,
    inbox: Receiver<SyncMessage>,
    data: Snapshot,
}

impl Store {
    pub fn open(db: Database, bus: SyncBus) -> StoreResult<Self> {
        init_db(&db)?;
        let data = db.with_conn(|conn| Snapshot::load(conn))?;
        let inbox = bus.subscribe();
        let origin = new_id();

        tracing::debug!(
            origin = %origin,
            accounts = data.accounts.len(),
            properties = data.properties.len(),
            leads = data.leads.len(),
            "store opened"
        );

        Ok(Self {
            db,
            bus,
            origin,
            inbox,
            data,
        })
    }

    pub fn data(&self) -> &Snapshot {
        &self.data
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn bus(&self) -> &SyncBus {
        &self.bus
    }

    /// Replace one or more collections as a single change.
    ///
    /// Other handles see the batch as one message and the database writes
    /// share one transaction. Storage failures never fail the call: listing
    /// images are dropped and the write retried once, and if that fails too
    /// the change stays in memory only.
    pub fn commit(&mut self, updates: Vec<CollectionUpdate>) -> Option<StorageWarning> {
        if updates.is_empty() {
            return None;
        }

        for u in &updates {
            self.data.apply(u.clone());
        }

        self.bus.publish(SyncMessage {
            origin: self.origin.clone(),
            updates: updates.clone(),
        });

        match self.persist(&updates) {
            Ok(()) => None,
            Err(e) => {
                let has_images = updates
                    .iter()
                    .any(|u| matches!(u, CollectionUpdate::Properties(_)));
                if !has_images {
                    tracing::error!(error = %e, "failed to persist collections");
                    return Some(StorageWarning::DataWillBeLost);
                }

                tracing::warn!(error = %e, "storage full with images, retrying without them");
                let stripped: Vec<CollectionUpdate> =
                    updates.iter().map(CollectionUpdate::without_inline_images).collect();
                match self.persist(&stripped) {
                    Ok(()) => Some(StorageWarning::ImagesDropped),
                    Err(e) => {
                        tracing::error!(error = %e, "critical storage failure, keeping changes in memory");
                        Some(StorageWarning::DataWillBeLost)
                    }
                }
            }
        }
    }

    fn persist(&self, updates: &[CollectionUpdate]) -> Result<(), StoreError> {
        let mut entries: Vec<(CollectionKey, String)> = Vec::with_capacity(updates.len());
        for u in updates {
            entries.push((u.key(), u.to_json()?));
        }
        let quota = self.db.quota_bytes();
        self.db
            .with_conn(|conn| write_batch(conn, &entries, quota, Utc::now()))
    }

    /// Set or clear the signed-in account. The session is per handle and is
    /// not broadcast.
    pub fn set_session(&mut self, account: Option<Account>) {
        let result = match &account {
            Some(a) => serde_json::to_string(a)
                .map_err(StoreError::from)
                .and_then(|json| {
                    let quota = self.db.quota_bytes();
                    self.db.with_conn(|conn| {
                        write_payload(conn, CollectionKey::Session, json, quota, Utc::now())
                    })
                }),
            None => self
                .db
                .with_conn(|conn| delete_payload(conn, CollectionKey::Session)),
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to save user to storage");
        }
        self.data.session = account;
    }

    /// Apply whatever other handles published since the last call.
    /// Returns how many messages were applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.inbox.try_recv() {
            if msg.origin == self.origin {
                continue;
            }
            for u in msg.updates {
                self.data.apply(u);
            }
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!(origin = %self.origin, applied, "applied remote updates");
        }
        applied
    }

    /// Drop the in-memory snapshot and re-read everything from the database.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.data = self.db.with_conn(|conn| Snapshot::load(conn))?;
        Ok(())
    }
}
