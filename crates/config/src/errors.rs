use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("toml: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Tried to traverse into a primitive.
    #[error("can't traverse into non-table key: {key} (path {path})")]
    TraverseNonTableAt { key: String, path: String },

    /// Invalid override string.
    #[error("invalid override: '{0}'")]
    InvalidOverride(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}
