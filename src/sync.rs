//! Same-machine change feed between `Market` handles.
//!
//! Every mutation publishes the full new collection(s); receivers replace
//! their own snapshot wholesale. Last write wins, nothing is merged.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::account::Account;
use crate::domain::commission::CommissionClaim;
use crate::domain::interest::Interest;
use crate::domain::lead::{Lead, LeadHistoryEntry};
use crate::domain::property::Property;

/// Full-collection replace for one storage key.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionUpdate {
    Accounts(Vec<Account>),
    Properties(Vec<Property>),
    Interests(Vec<Interest>),
    Leads(Vec<Lead>),
    LeadHistory(Vec<LeadHistoryEntry>),
    CommissionClaims(Vec<CommissionClaim>),
}

/// One published change. Updates published together are applied together.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncMessage {
    pub origin: String,
    pub updates: Vec<CollectionUpdate>,
}

#[derive(Clone, Default)]
pub struct SyncBus {
    subscribers: Arc<Mutex<Vec<Sender<SyncMessage>>>>,
}

impl SyncBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<SyncMessage> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Deliver `msg` to every live subscriber, dropping the ones whose
    /// receiver is gone. Returns how many received it.
    pub fn publish(&self, msg: SyncMessage) -> usize {
        let mut subs = self.subscribers.lock();
        subs.retain(|tx| tx.send(msg.clone()).is_ok());
        subs.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
