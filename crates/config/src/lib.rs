//! Node configuration.

mod config;
mod errors;
mod overrides;

pub use config::{ClientConfig, Config, DaIncluderConfig, LoggingConfig};
pub use errors::ConfigError;
pub use overrides::{apply_override, load_config, parse_override};
