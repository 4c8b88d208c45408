//! Database types and low level interfaces shared between the store
//! implementations and the services that use them.

mod errors;
#[cfg(feature = "stubs")]
pub mod stubs;
pub mod traits;

pub use errors::DbError;

pub type DbResult<T> = Result<T, DbError>;
