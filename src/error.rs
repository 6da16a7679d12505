use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures of the external summarizer. All of them are recoverable: the
/// engine logs them and falls back to TextRank.
#[derive(Error, Debug)]
pub enum ExternalError {
    #[error("external summarizer not found (searched: {searched:?})")]
    Unavailable { searched: Vec<PathBuf> },

    #[error("external summarizer could not run: {0}")]
    Execution(String),

    #[error("external summarizer did not finish within {0:?}")]
    Timeout(Duration),

    #[error("no external summarizer slot became free within {0:?}")]
    Busy(Duration),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}
