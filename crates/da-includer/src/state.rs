use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use strata_db_types::traits::MetadataDatabase;
use tracing::info;

use crate::error::{DaIncluderError, Result};

/// Metadata key the DA-included height is persisted under.
pub const DA_INCLUDED_HEIGHT_KEY: &[u8] = b"d";

/// Encodes a height as its 8-byte little-endian record.
pub fn encode_height(height: u64) -> [u8; 8] {
    height.to_le_bytes()
}

/// Decodes an 8-byte little-endian height record.
pub fn decode_height(bytes: &[u8]) -> std::result::Result<u64, DaIncluderError> {
    let raw: [u8; 8] = bytes
        .try_into()
        .map_err(|_| DaIncluderError::CorruptHeightRecord { len: bytes.len() })?;
    Ok(u64::from_le_bytes(raw))
}

/// The DA-included height, owned by the includer task.
///
/// This is the only handle that can advance the height. It is deliberately not `Clone`;
/// other components observe the height through [`DaIncludedHeightReader`].
#[derive(Debug)]
pub struct DaIncludedHeightState<TDb> {
    height: Arc<AtomicU64>,
    db: Arc<TDb>,
}

impl<TDb: MetadataDatabase> DaIncludedHeightState<TDb> {
    /// Current height.
    pub fn get(&self) -> u64 {
        self.height.load(Ordering::Acquire)
    }

    /// Returns a cheap, cloneable read-only view of the height.
    pub fn reader(&self) -> DaIncludedHeightReader {
        DaIncludedHeightReader {
            height: self.height.clone(),
        }
    }

    /// Writes the durable record for `height`.
    pub(crate) fn persist(&self, height: u64) -> Result<()> {
        self.db
            .put_metadata(DA_INCLUDED_HEIGHT_KEY, encode_height(height).to_vec())?;
        Ok(())
    }

    /// Moves the in-memory height from `expected` to `new`.
    pub(crate) fn advance(&self, expected: u64, new: u64) -> Result<()> {
        self.height
            .compare_exchange(expected, new, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|actual| DaIncluderError::HeightCasFailed {
                expected,
                actual,
                new,
            })
    }

    #[cfg(test)]
    pub(crate) fn force_height(&self, height: u64) {
        self.height.store(height, Ordering::Release);
    }
}

/// Read-only view of the DA-included height. Reads never block and never observe a
/// decrease.
#[derive(Debug, Clone)]
pub struct DaIncludedHeightReader {
    height: Arc<AtomicU64>,
}

impl DaIncludedHeightReader {
    /// Current height. Lock-free; successive reads never observe a decrease.
    pub fn get(&self) -> u64 {
        self.height.load(Ordering::Acquire)
    }
}

/// Loads the DA-included height from `db`.
///
/// Falls back to `base_height` when nothing has been persisted yet. A record of the
/// wrong length is reported as [`DaIncluderError::CorruptHeightRecord`].
pub fn init_da_included_state<TDb: MetadataDatabase>(
    db: Arc<TDb>,
    base_height: u64,
) -> std::result::Result<DaIncludedHeightState<TDb>, DaIncluderError> {
    let height = match db.get_metadata(DA_INCLUDED_HEIGHT_KEY)? {
        Some(bytes) => decode_height(&bytes)?,
        None => {
            info!(%base_height, "no persisted DA-included height; starting from base");
            base_height
        }
    };

    info!(%height, "loaded DA-included height");

    Ok(DaIncludedHeightState {
        height: Arc::new(AtomicU64::new(height)),
        db,
    })
}
