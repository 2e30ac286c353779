pub mod account;
pub mod areas;
pub mod commission;
pub mod interest;
pub mod lead;
pub mod price;
pub mod property;
pub mod scoring;
