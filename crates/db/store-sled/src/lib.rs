//! Sled store for the node's block-management metadata.

mod config;
mod init;
pub mod macros;
pub mod metadata;

pub use config::SledDbConfig;
pub use metadata::MetadataDBSled;

pub use crate::init::open_sled_database;

pub const SLED_NAME: &str = "strata-node";
