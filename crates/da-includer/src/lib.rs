//! Advances the DA-included height: the highest block height such that every block up to
//! and including it has been confirmed on the data availability layer.

mod ctx;
mod error;
mod finality;
mod handle;
mod oracle;
mod state;
mod task;
#[cfg(test)]
pub(crate) mod test_utils;
mod trigger;

pub use error::DaIncluderError;
#[cfg(feature = "test-utils")]
pub use finality::MockFinalitySink;
pub use finality::{FinalityError, FinalitySink, MonotonicFinalitySink};
pub use handle::{DaIncluderBuilder, DaIncluderHandle};
#[cfg(feature = "test-utils")]
pub use oracle::{MockBlockCommitmentSource, MockInclusionOracle};
pub use oracle::{
    empty_data_commitment, BlockCommitmentSource, BlockCommitments, CacheInclusionOracle,
    DaInclusionCache, Hash, InclusionOracle, OracleError,
};
pub use state::{
    decode_height, encode_height, init_da_included_state, DaIncludedHeightReader,
    DaIncludedHeightState, DA_INCLUDED_HEIGHT_KEY,
};
pub use trigger::DaIncluderTrigger;
