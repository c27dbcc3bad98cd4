//! Error types for ocr-gate-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while persisting the training corpus.
///
/// These never escape the corpus API as `Err`: callers see them folded into
/// [`Persistence::Failed`](crate::corpus::Persistence::Failed).
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Reading or writing the corpus file failed.
    #[error("corpus file {path}: {source}")]
    Io {
        /// The corpus file involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The corpus could not be encoded as JSON.
    #[error("failed to encode corpus: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;
