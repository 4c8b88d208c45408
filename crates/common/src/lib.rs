//! Utilities shared by the node's services and binaries.

pub mod logging;
pub mod retry;
