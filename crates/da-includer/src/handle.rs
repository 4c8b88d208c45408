use std::{future::Future, sync::Arc};

use strata_db_types::traits::MetadataDatabase;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    ctx::DaIncluderCtx,
    finality::FinalitySink,
    oracle::InclusionOracle,
    state::{DaIncludedHeightReader, DaIncludedHeightState},
    task::da_includer_task,
    trigger::{trigger_channel, DaIncluderTrigger},
};

/// Handle for waking the DA includer and observing its progress.
#[derive(Debug)]
pub struct DaIncluderHandle {
    reader: DaIncludedHeightReader,
    height_rx: watch::Receiver<u64>,
    trigger: DaIncluderTrigger,
}

impl DaIncluderHandle {
    /// Returns a lock-free reader of the current DA-included height.
    pub fn reader(&self) -> DaIncludedHeightReader {
        self.reader.clone()
    }

    /// Returns a watcher that is notified each time the height advances.
    pub fn height_watcher(&self) -> watch::Receiver<u64> {
        self.height_rx.clone()
    }

    /// Returns a trigger that sync services use to signal new DA inclusions.
    pub fn trigger(&self) -> DaIncluderTrigger {
        self.trigger.clone()
    }
}

/// Builder for the DA includer task.
#[derive(Debug)]
pub struct DaIncluderBuilder<TDb, TOracle, TSink> {
    state: DaIncludedHeightState<TDb>,
    oracle: Arc<TOracle>,
    finality: Arc<TSink>,
    cancel: Option<CancellationToken>,
}

impl<TDb, TOracle, TSink> DaIncluderBuilder<TDb, TOracle, TSink> {
    /// Creates a new builder. Takes ownership of the height state; the built task becomes
    /// its only writer.
    pub fn new(
        state: DaIncludedHeightState<TDb>,
        oracle: Arc<TOracle>,
        finality: Arc<TSink>,
    ) -> Self {
        Self {
            state,
            oracle,
            finality,
            cancel: None,
        }
    }

    /// Sets the token that stops the task.
    ///
    /// Without one, the task runs until every [`DaIncluderTrigger`] is dropped.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Builds and returns the includer handle and task.
    pub fn build(self) -> (DaIncluderHandle, impl Future<Output = ()>)
    where
        TDb: MetadataDatabase,
        TOracle: InclusionOracle,
        TSink: FinalitySink,
    {
        let (trigger, trigger_rx) = trigger_channel();
        let (height_tx, height_rx) = watch::channel(self.state.get());
        let handle = DaIncluderHandle {
            reader: self.state.reader(),
            height_rx,
            trigger,
        };
        let ctx = DaIncluderCtx {
            oracle: self.oracle,
            finality: self.finality,
            height_tx,
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        };
        let task = da_includer_task(self.state, trigger_rx, ctx);

        (handle, task)
    }
}
