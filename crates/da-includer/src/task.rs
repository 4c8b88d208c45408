use strata_db_types::traits::MetadataDatabase;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    ctx::DaIncluderCtx,
    error::{DaIncluderError, Result},
    finality::FinalitySink,
    oracle::InclusionOracle,
    state::DaIncludedHeightState,
};

pub(crate) async fn da_includer_task<TDb, TOracle, TSink>(
    state: DaIncludedHeightState<TDb>,
    mut trigger_rx: mpsc::Receiver<()>,
    ctx: DaIncluderCtx<TOracle, TSink>,
) where
    TDb: MetadataDatabase,
    TOracle: InclusionOracle,
    TSink: FinalitySink,
{
    info!(height = %state.get(), "starting da includer");

    loop {
        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => {
                info!("da includer cancelled; exiting");
                return;
            }
            msg = trigger_rx.recv() => {
                if msg.is_none() {
                    warn!("all da includer triggers dropped; exiting");
                    return;
                }
            }
        }

        match drain_included_heights(&state, &ctx).await {
            Ok(0) => {}
            Ok(advanced) => {
                debug!(%advanced, height = %state.get(), "advanced DA-included height");
            }
            Err(error) => handle_includer_error(error, "drain included heights"),
        }
    }
}

/// Handles DA includer errors, panicking on non-recoverable errors.
/// Note: the task executor expects critical tasks to panic, not return an Err.
/// Critical task panics will trigger app shutdown.
///
/// Recoverable errors (executor or storage failures) are logged; the height is retried on
/// the next trigger.
fn handle_includer_error(error: impl Into<DaIncluderError>, context: &str) {
    let error = error.into();

    if error.is_fatal() {
        panic!("{}", error.panic_message());
    } else {
        error!(%error, %context, "recoverable error in da includer");
    }
}

/// Advances the height one block at a time for as long as the oracle confirms the next
/// block. Returns how many heights were committed.
///
/// Stops at the first height that is not (or cannot yet be shown to be) DA included, and
/// between heights when cancelled.
pub(crate) async fn drain_included_heights<TDb, TOracle, TSink>(
    state: &DaIncludedHeightState<TDb>,
    ctx: &DaIncluderCtx<TOracle, TSink>,
) -> Result<u64>
where
    TDb: MetadataDatabase,
    TOracle: InclusionOracle,
    TSink: FinalitySink,
{
    let mut current = state.get();
    let mut advanced = 0;

    loop {
        if ctx.cancel.is_cancelled() {
            debug!(%current, "cancelled while draining");
            break;
        }

        let Some(next) = current.checked_add(1) else {
            warn!(%current, "DA-included height at maximum");
            break;
        };

        match ctx.oracle.is_da_included(next).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(height = %next, "height not yet DA included");
                break;
            }
            Err(error) => {
                debug!(height = %next, %error, "no more blocks to check at this time");
                break;
            }
        }

        commit_height(state, ctx, current, next).await?;
        current = next;
        advanced += 1;
    }

    Ok(advanced)
}

/// Commits `next` in order: executor finality, durable record, in-memory height.
/// A failing step leaves the later ones undone.
async fn commit_height<TDb, TOracle, TSink>(
    state: &DaIncludedHeightState<TDb>,
    ctx: &DaIncluderCtx<TOracle, TSink>,
    current: u64,
    next: u64,
) -> Result<()>
where
    TDb: MetadataDatabase,
    TSink: FinalitySink,
{
    debug!(height = %next, "setting final");
    ctx.finality.set_final(next).await?;

    if let Err(error) = state.persist(next) {
        // executor is now ahead of the record until the next pass persists it
        warn!(height = %next, "height finalized but not persisted");
        return Err(error);
    }

    state.advance(current, next)?;
    ctx.notify_height(next);

    Ok(())
}
