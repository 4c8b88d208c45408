use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::trace;

/// Wakes the DA includer.
///
/// At most one wake-up is pending at a time; notifying while one is already queued is a
/// no-op, so bursts of notifications collapse into a single extra drain pass.
#[derive(Debug, Clone)]
pub struct DaIncluderTrigger {
    tx: mpsc::Sender<()>,
}

impl DaIncluderTrigger {
    /// Requests a drain pass. Never blocks.
    ///
    /// Returns `true` if a new wake-up was queued, `false` if one was already pending or
    /// the includer has exited.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => false,
            Err(TrySendError::Closed(())) => {
                trace!("da includer gone; dropping trigger");
                false
            }
        }
    }
}

pub(crate) fn trigger_channel() -> (DaIncluderTrigger, mpsc::Receiver<()>) {
    let (tx, rx) = mpsc::channel(1);
    (DaIncluderTrigger { tx }, rx)
}
