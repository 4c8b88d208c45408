//! Deciding whether a block height is fully available on the DA layer.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// 32-byte block or data hash.
pub type Hash = [u8; 32];

/// Reasons the inclusion status of a height cannot be determined yet.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The block store has not synced this height.
    #[error("height {height} is above the synced height {synced}")]
    AboveSyncedHeight { height: u64, synced: u64 },

    /// The block store has no block at this height.
    #[error("missing block at height {0}")]
    MissingBlock(u64),

    /// The underlying block source failed.
    #[error("block source: {0}")]
    Source(String),
}

/// Answers whether the block at a height has been confirmed on the DA layer.
///
/// `Err` means "cannot yet determine" and is treated the same as "not included" by the
/// includer, only logged differently.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait InclusionOracle: Send + Sync + 'static {
    async fn is_da_included(&self, height: u64) -> Result<bool, OracleError>;
}

/// Commitments identifying the two halves of a block posted to DA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCommitments {
    pub header_hash: Hash,
    pub data_commitment: Hash,
}

/// Read access to locally stored blocks.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait BlockCommitmentSource: Send + Sync + 'static {
    /// Highest height present in the block store.
    fn synced_height(&self) -> Result<u64, OracleError>;

    /// Commitments of the block at `height`, if stored.
    fn block_commitments(&self, height: u64) -> Result<Option<BlockCommitments>, OracleError>;
}

/// Data commitment of a block with no transactions. Such data is never posted to DA.
pub fn empty_data_commitment() -> Hash {
    Sha256::digest(b"").into()
}

/// Hashes observed on DA, with the DA height they were found at.
///
/// Filled by the header and data sync services as they retrieve blobs from DA.
#[derive(Debug, Default)]
pub struct DaInclusionCache {
    entries: RwLock<HashMap<Hash, u64>>,
}

impl DaInclusionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `hash` as seen on DA at `da_height`.
    pub fn set_da_included(&self, hash: Hash, da_height: u64) {
        self.entries.write().insert(hash, da_height);
    }

    pub fn is_da_included(&self, hash: &Hash) -> bool {
        self.entries.read().contains_key(hash)
    }

    /// DA height `hash` was seen at.
    pub fn da_height(&self, hash: &Hash) -> Option<u64> {
        self.entries.read().get(hash).copied()
    }

    /// Forgets `hash`, returning the DA height it was recorded at.
    pub fn remove(&self, hash: &Hash) -> Option<u64> {
        self.entries.write().remove(hash)
    }
}

/// [`InclusionOracle`] backed by the block store and the sync services' inclusion caches.
///
/// A height is included once its header hash is in the header cache and its data is
/// either empty or in the data cache.
#[derive(Debug)]
pub struct CacheInclusionOracle<TSource> {
    source: Arc<TSource>,
    header_cache: Arc<DaInclusionCache>,
    data_cache: Arc<DaInclusionCache>,
    empty_data: Hash,
}

impl<TSource> CacheInclusionOracle<TSource> {
    pub fn new(
        source: Arc<TSource>,
        header_cache: Arc<DaInclusionCache>,
        data_cache: Arc<DaInclusionCache>,
    ) -> Self {
        Self {
            source,
            header_cache,
            data_cache,
            empty_data: empty_data_commitment(),
        }
    }
}

#[async_trait]
impl<TSource: BlockCommitmentSource> InclusionOracle for CacheInclusionOracle<TSource> {
    async fn is_da_included(&self, height: u64) -> Result<bool, OracleError> {
        let synced = self.source.synced_height()?;
        if height > synced {
            return Err(OracleError::AboveSyncedHeight { height, synced });
        }

        let commitments = self
            .source
            .block_commitments(height)?
            .ok_or(OracleError::MissingBlock(height))?;

        if !self.header_cache.is_da_included(&commitments.header_hash) {
            return Ok(false);
        }

        Ok(commitments.data_commitment == self.empty_data
            || self.data_cache.is_da_included(&commitments.data_commitment))
    }
}
