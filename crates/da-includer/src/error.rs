use strata_db_types::DbError;
use thiserror::Error;

use crate::finality::FinalityError;

/// Error type for DA includer operations.
///
/// Errors are categorized into:
/// - **Recoverable**: the current drain pass ends and the height is retried on the next
///   trigger (executor or storage hiccups)
/// - **NonRecoverable**: the height state can no longer be trusted (corrupt record, a
///   second writer)
#[derive(Debug, Error)]
pub enum DaIncluderError {
    /// Persisting or reading the height record failed (recoverable - may be transient)
    #[error("db error: {0}")]
    Db(#[from] DbError),

    /// Executor refused or failed to finalize the height (recoverable)
    #[error("finality error: {0}")]
    Finality(#[from] FinalityError),

    /// The stored height record is not an 8-byte little-endian integer.
    #[error("corrupt DA-included height record: expected 8 bytes, found {len}")]
    CorruptHeightRecord { len: usize },

    /// The in-memory height was changed by someone other than the includer task.
    #[error("DA-included height changed concurrently: expected {expected}, found {actual} while committing {new}")]
    HeightCasFailed { expected: u64, actual: u64, new: u64 },
}

impl DaIncluderError {
    /// Returns true if this error is recoverable and the operation can be retried.
    pub fn is_recoverable(&self) -> bool {
        match self {
            DaIncluderError::CorruptHeightRecord { .. }
            | DaIncluderError::HeightCasFailed { .. } => false,
            DaIncluderError::Db(_) | DaIncluderError::Finality(_) => true,
        }
    }

    /// Returns true if this is a fatal error that should cause the task to panic.
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Creates a detailed panic message for non-recoverable errors.
    pub fn panic_message(&self) -> String {
        match self {
            DaIncluderError::HeightCasFailed {
                expected,
                actual,
                new,
            } => format!(
                "FATAL: DA includer lost single writer ownership of the DA-included height.\n\
                 \n\
                 Expected the height to be {expected} while committing {new}, but found {actual}.\n\
                 Only the DA includer task may advance this height; another writer exists."
            ),
            DaIncluderError::CorruptHeightRecord { len } => format!(
                "FATAL: DA-included height record is corrupt ({len} bytes, expected 8).\n\
                 \n\
                 Refusing to guess the height; inspect or restore the metadata store."
            ),
            _ => format!("FATAL: Unexpected non-recoverable error: {}", self),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, DaIncluderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DaIncluderError::Db(DbError::Busy).is_recoverable());
        assert!(DaIncluderError::Finality(FinalityError::Executor("down".into())).is_recoverable());
        assert!(DaIncluderError::CorruptHeightRecord { len: 3 }.is_fatal());
        assert!(DaIncluderError::HeightCasFailed {
            expected: 1,
            actual: 2,
            new: 2
        }
        .is_fatal());
    }

    #[test]
    fn test_cas_panic_message_names_heights() {
        let msg = DaIncluderError::HeightCasFailed {
            expected: 10,
            actual: 15,
            new: 11,
        }
        .panic_message();

        assert!(msg.contains("single writer"));
        assert!(msg.contains("10"));
        assert!(msg.contains("15"));
        assert!(msg.contains("11"));
    }
}
