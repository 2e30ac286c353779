//! Smart Broker marketplace core.
//!
//! Accounts, listings, buyer interests, leads and commission claims, kept as
//! JSON collections in SQLite and shared between handles over a [`sync::SyncBus`].

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod market;
pub mod store;
pub mod sync;

pub use config::MarketConfig;
pub use market::Market;

#[cfg(test)]
mod tests;
