// src/config.rs
use std::env;
use std::path::PathBuf;

use crate::db::connection::DEFAULT_QUOTA_BYTES;
use crate::domain::commission::CommissionSettings;

#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// SQLite file; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    /// Byte budget over all stored collections.
    pub quota_bytes: usize,
    /// Settings used for claims created from now on.
    pub commission: CommissionSettings,
    /// Built-in administrator login.
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
    /// Password given to users an admin adds by hand.
    pub default_user_password: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
            commission: CommissionSettings::default(),
            admin_email: "admin@smartbroker.com".to_string(),
            admin_password: "admin123".to_string(),
            admin_name: "Admin".to_string(),
            default_user_password: "password123".to_string(),
        }
    }
}

impl MarketConfig {
    /// Defaults, overridden by `SMART_BROKER_DB`, `SMART_BROKER_QUOTA_BYTES`
    /// and `SMART_BROKER_COMMISSION_PCT` when set. Unparseable numbers are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(path) = env::var("SMART_BROKER_DB") {
            if !path.trim().is_empty() {
                cfg.db_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(raw) = env::var("SMART_BROKER_QUOTA_BYTES") {
            match raw.trim().parse::<usize>() {
                Ok(q) => cfg.quota_bytes = q,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring SMART_BROKER_QUOTA_BYTES"),
            }
        }

        if let Ok(raw) = env::var("SMART_BROKER_COMMISSION_PCT") {
            match raw.trim().parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => cfg.commission.percentage = p,
                _ => tracing::warn!(value = %raw, "ignoring SMART_BROKER_COMMISSION_PCT"),
            }
        }

        cfg
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }
}
