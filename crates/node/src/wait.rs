//! Blocking helpers that poll a node until a height is reached.

use std::time::Duration;

use strata_common::retry::retry;
use strata_config::DaIncluderConfig;
use strata_da_includer::DaIncludedHeightReader;
use thiserror::Error;

use crate::heights::{HeightView, HeightViewError, NodeHeights};

const DEFAULT_POLL_TRIES: usize = 300;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How often, and how many times, to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub tries: usize,
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(tries: usize, interval: Duration) -> Self {
        Self { tries, interval }
    }

    pub fn from_config(config: &DaIncluderConfig) -> Self {
        Self::new(
            config.poll_tries,
            Duration::from_millis(config.poll_interval_ms),
        )
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_TRIES, DEFAULT_POLL_INTERVAL)
    }
}

#[derive(Debug, Error)]
pub enum WaitError {
    #[error(transparent)]
    View(#[from] HeightViewError),

    #[error("expected height >= {expected}, got {actual}")]
    Behind { expected: u64, actual: u64 },

    #[error("waiting for DA inclusion")]
    AwaitingDaInclusion,
}

pub fn wait_for_first_block(
    node: &NodeHeights,
    view: HeightView,
    poll: PollConfig,
) -> Result<(), WaitError> {
    wait_for_at_least_n_blocks(node, 1, view, poll)
}

/// Polls `view` until it reports at least `n`. Returns the last error once `poll` is
/// exhausted.
///
/// A view the node does not expose fails immediately.
pub fn wait_for_at_least_n_blocks(
    node: &NodeHeights,
    n: u64,
    view: HeightView,
    poll: PollConfig,
) -> Result<(), WaitError> {
    if !node.supports(view) {
        return Err(HeightViewError::Unsupported {
            view,
            kind: node.kind(),
        }
        .into());
    }

    retry(poll.tries, poll.interval, || {
        let actual = node.get_height(view)?;
        at_least(n, actual)
    })
}

pub fn wait_for_first_da_included_height(
    reader: &DaIncludedHeightReader,
    poll: PollConfig,
) -> Result<(), WaitError> {
    wait_for_at_least_n_da_included_height(reader, 1, poll)
}

/// Polls the DA-included height until it is at least `n`. A height of 0 means nothing
/// has been DA included yet.
pub fn wait_for_at_least_n_da_included_height(
    reader: &DaIncludedHeightReader,
    n: u64,
    poll: PollConfig,
) -> Result<(), WaitError> {
    retry(poll.tries, poll.interval, || match reader.get() {
        0 => Err(WaitError::AwaitingDaInclusion),
        actual => at_least(n, actual),
    })
}

fn at_least(expected: u64, actual: u64) -> Result<(), WaitError> {
    if actual >= expected {
        Ok(())
    } else {
        Err(WaitError::Behind { expected, actual })
    }
}
