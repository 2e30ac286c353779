//! The marketplace data-access layer: one handle per "tab".
//!
//! Operations are grouped by component: [`directory`] (accounts and
//! sessions), [`catalog`] (listings), [`pipeline`] (interests and leads),
//! [`commission`] (deal closing and claims) and [`query`] (read-only views).

pub mod catalog;
pub mod commission;
pub mod directory;
pub mod pipeline;
pub mod query;

use chrono::Utc;

use crate::auth::password::PasswordHash;
use crate::config::MarketConfig;
use crate::db::connection::Database;
use crate::domain::account::{Account, AccountStatus, Role};
use crate::domain::commission::CommissionSettings;
use crate::errors::StoreResult;
use crate::store::{Snapshot, Store};
use crate::sync::SyncBus;

/// Id of the built-in administrator.
pub const ADMIN_ID: &str = "admin";

/// Recorded as `updated_by` when nobody is signed in.
pub const SYSTEM_ACTOR: &str = "system";

pub struct Market {
    store: Store,
    admin: Account,
    commission: CommissionSettings,
    default_user_password: String,
}

impl Market {
    /// Open a handle on the configured database and join `bus`.
    pub fn open(config: MarketConfig, bus: SyncBus) -> StoreResult<Self> {
        let db = match &config.db_path {
            Some(path) => Database::open(path, config.quota_bytes)?,
            None => Database::open_in_memory(config.quota_bytes)?,
        };
        let store = Store::open(db, bus)?;

        let admin = Account {
            id: ADMIN_ID.to_string(),
            name: config.admin_name.clone(),
            email: config.admin_email.clone(),
            phone: String::new(),
            password: PasswordHash::new(&config.admin_password),
            role: Role::Admin,
            status: AccountStatus::Active,
            buyer_score: 0,
            budget: None,
            preferred_location: None,
            created_at: Utc::now(),
        };

        let commission = if config.commission.is_valid() {
            config.commission
        } else {
            tracing::warn!(
                percentage = config.commission.percentage,
                "invalid commission rate in config, using the default"
            );
            CommissionSettings::default()
        };

        Ok(Self {
            store,
            admin,
            commission,
            default_user_password: config.default_user_password,
        })
    }

    /// Standalone in-memory handle with default settings.
    pub fn in_memory() -> StoreResult<Self> {
        Self::open(MarketConfig::in_memory(), SyncBus::new())
    }

    pub fn data(&self) -> &Snapshot {
        self.store.data()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Pull in changes other handles published. See [`Store::sync`].
    pub fn sync(&mut self) -> usize {
        self.store.sync()
    }

    pub fn reload(&mut self) -> StoreResult<()> {
        self.store.reload()
    }

    pub fn current_user(&self) -> Option<&Account> {
        self.store.data().session.as_ref()
    }

    pub fn commission_settings(&self) -> CommissionSettings {
        self.commission
    }

    fn actor_id(&self) -> String {
        self.current_user()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| SYSTEM_ACTOR.to_string())
    }
}
