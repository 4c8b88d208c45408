use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FinalityError {
    /// A height below the already finalized one was requested.
    #[error("cannot finalize {requested}: height {finalized} is already final")]
    Regression { requested: u64, finalized: u64 },

    /// The execution layer failed to finalize.
    #[error("executor: {0}")]
    Executor(String),
}

/// Marks a block height as final in the execution layer.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait FinalitySink: Send + Sync + 'static {
    async fn set_final(&self, height: u64) -> Result<(), FinalityError>;
}

/// Wraps a [`FinalitySink`] so that finality only ever moves forward.
///
/// Repeating the current final height is acknowledged without reaching the inner sink;
/// lower heights are rejected with [`FinalityError::Regression`].
#[derive(Debug)]
pub struct MonotonicFinalitySink<S> {
    inner: S,
    finalized: Mutex<Option<u64>>,
}

impl<S> MonotonicFinalitySink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            finalized: Mutex::new(None),
        }
    }

    /// Creates the wrapper for an executor that has already finalized `height`.
    pub fn with_finalized(inner: S, height: u64) -> Self {
        Self {
            inner,
            finalized: Mutex::new(Some(height)),
        }
    }

    /// Highest height finalized through this wrapper, if any.
    pub async fn finalized(&self) -> Option<u64> {
        *self.finalized.lock().await
    }
}

#[async_trait]
impl<S: FinalitySink> FinalitySink for MonotonicFinalitySink<S> {
    async fn set_final(&self, height: u64) -> Result<(), FinalityError> {
        let mut finalized = self.finalized.lock().await;

        match *finalized {
            Some(current) if height == current => {
                debug!(%height, "height already final");
                return Ok(());
            }
            Some(current) if height < current => {
                return Err(FinalityError::Regression {
                    requested: height,
                    finalized: current,
                });
            }
            _ => {}
        }

        self.inner.set_final(height).await?;
        *finalized = Some(height);
        Ok(())
    }
}
