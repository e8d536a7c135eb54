//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A metadata row that cannot drive a run.
    #[error("Invalid metadata row {row}: {message}")]
    InvalidMetadata { row: usize, message: String },

    #[error("expected one or two style ids, found {0}")]
    StyleIdCount(usize),

    #[error("No metadata row lists style id '{0}'")]
    UnknownStyleId(String),
}
