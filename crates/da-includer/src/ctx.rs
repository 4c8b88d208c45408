use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub(crate) struct DaIncluderCtx<TOracle, TSink> {
    pub oracle: Arc<TOracle>,
    pub finality: Arc<TSink>,
    pub height_tx: watch::Sender<u64>,
    pub cancel: CancellationToken,
}

impl<TOracle, TSink> DaIncluderCtx<TOracle, TSink> {
    /// Notify watchers of a newly committed DA-included height.
    pub(crate) fn notify_height(&self, height: u64) {
        let _ = self.height_tx.send(height);
    }
}
