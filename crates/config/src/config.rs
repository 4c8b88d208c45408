use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default value for `datadir` in [`ClientConfig`].
const DEFAULT_DATADIR: &str = "strata-data";

/// Default DB retry count.
const DEFAULT_DB_RETRY_COUNT: u16 = 5;

/// Default DB retry delay in ms.
const DEFAULT_DB_RETRY_DELAY: u64 = 200;

/// Default chain initial height.
const DEFAULT_INITIAL_HEIGHT: u64 = 1;

/// Default number of polls made by the height wait helpers.
const DEFAULT_POLL_TRIES: usize = 300;

/// Default delay between polls of the height wait helpers, in ms.
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The data directory where database contents and node identity reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// How many times to retry if a db write fails.
    #[serde(default = "default_db_retry_count")]
    pub db_retry_count: u16,

    /// Db retry delay in ms.
    #[serde(default = "default_db_retry_delay")]
    pub db_retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            db_retry_count: DEFAULT_DB_RETRY_COUNT,
            db_retry_delay_ms: DEFAULT_DB_RETRY_DELAY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaIncluderConfig {
    /// Height of the first block of the chain. Until something is persisted, the
    /// DA-included height is the height just below it.
    #[serde(default = "default_initial_height")]
    pub initial_height: u64,

    /// Attempts made by the "wait for height" helpers.
    #[serde(default = "default_poll_tries")]
    pub poll_tries: usize,

    /// Delay between attempts of the "wait for height" helpers, in ms.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl DaIncluderConfig {
    /// DA-included height to assume when none has been persisted yet.
    pub fn base_height(&self) -> u64 {
        self.initial_height.saturating_sub(1)
    }
}

impl Default for DaIncluderConfig {
    fn default() -> Self {
        Self {
            initial_height: DEFAULT_INITIAL_HEIGHT,
            poll_tries: DEFAULT_POLL_TRIES,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub da_includer: DaIncluderConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_db_retry_count() -> u16 {
    DEFAULT_DB_RETRY_COUNT
}

fn default_db_retry_delay() -> u64 {
    DEFAULT_DB_RETRY_DELAY
}

fn default_initial_height() -> u64 {
    DEFAULT_INITIAL_HEIGHT
}

fn default_poll_tries() -> usize {
    DEFAULT_POLL_TRIES
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
