pub mod collections;
pub mod connection;
