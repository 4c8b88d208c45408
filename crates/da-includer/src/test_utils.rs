use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use strata_db_types::{
    stubs::metadata::StubMetadataDb, traits::MetadataDatabase, DbError, DbResult,
};
use tokio::sync::{watch, Notify};
use tokio_util::sync::CancellationToken;

use crate::{
    ctx::DaIncluderCtx,
    finality::MockFinalitySink,
    oracle::{InclusionOracle, MockInclusionOracle, OracleError},
    state::{encode_height, init_da_included_state, DaIncludedHeightState, DA_INCLUDED_HEIGHT_KEY},
};

/// Stub db with `height` already persisted.
pub(crate) fn seeded_db(height: u64) -> Arc<StubMetadataDb> {
    let db = StubMetadataDb::new();
    db.put_metadata(DA_INCLUDED_HEIGHT_KEY, encode_height(height).to_vec())
        .unwrap();
    Arc::new(db)
}

/// Loads state from `db`, with 0 as base height.
pub(crate) fn make_state<TDb: MetadataDatabase>(db: Arc<TDb>) -> DaIncludedHeightState<TDb> {
    init_da_included_state(db, 0).unwrap()
}

pub(crate) fn make_ctx<TOracle, TSink>(
    oracle: TOracle,
    sink: TSink,
) -> (DaIncluderCtx<TOracle, TSink>, watch::Receiver<u64>) {
    let (height_tx, height_rx) = watch::channel(0);
    let ctx = DaIncluderCtx {
        oracle: Arc::new(oracle),
        finality: Arc::new(sink),
        height_tx,
        cancel: CancellationToken::new(),
    };
    (ctx, height_rx)
}

/// Oracle reporting every height up to and including `last` as included.
pub(crate) fn oracle_included_through(last: u64) -> MockInclusionOracle {
    let mut oracle = MockInclusionOracle::new();
    oracle
        .expect_is_da_included()
        .returning(move |height| Ok(height <= last));
    oracle
}

pub(crate) fn accepting_sink() -> MockFinalitySink {
    let mut sink = MockFinalitySink::new();
    sink.expect_set_final().returning(|_| Ok(()));
    sink
}

/// Metadata db whose next `failures` writes fail.
#[derive(Debug)]
pub(crate) struct FlakyMetadataDb {
    inner: StubMetadataDb,
    failures: AtomicUsize,
    put_attempts: AtomicUsize,
}

impl FlakyMetadataDb {
    pub(crate) fn seeded(height: u64, failures: usize) -> Self {
        let inner = StubMetadataDb::new();
        inner
            .put_metadata(DA_INCLUDED_HEIGHT_KEY, encode_height(height).to_vec())
            .unwrap();
        Self {
            inner,
            failures: AtomicUsize::new(failures),
            put_attempts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn put_attempts(&self) -> usize {
        self.put_attempts.load(Ordering::SeqCst)
    }
}

impl MetadataDatabase for FlakyMetadataDb {
    fn get_metadata(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        self.inner.get_metadata(key)
    }

    fn put_metadata(&self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        self.put_attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(DbError::IoError("injected write failure".into()));
        }
        self.inner.put_metadata(key, value)
    }
}

/// Oracle whose first call blocks until [`GatedOracle::release`]. Always answers "not
/// included".
#[derive(Debug, Default)]
pub(crate) struct GatedOracle {
    calls: AtomicUsize,
    entered: Notify,
    gate: Notify,
}

impl GatedOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Waits until the first call is blocked on the gate.
    pub(crate) async fn entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InclusionOracle for GatedOracle {
    async fn is_da_included(&self, _height: u64) -> Result<bool, OracleError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        Ok(false)
    }
}
