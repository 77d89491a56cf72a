//! # Error Taxonomy
//!
//! Per-observation and per-adapter errors are absorbed into the pass report.
//! Persistence errors abort the pass. Configuration errors stop the process
//! before any pass starts.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::report::FailureKind;

/// A hardware address that cannot be canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("invalid hardware address `{raw}`")]
    Invalid { raw: String },
}

/// A source that could not deliver its observations for this pass.
#[derive(Debug, Error)]
#[error("source `{source_id}` failed: {cause}")]
pub struct AdapterError {
    pub source_id: String,
    pub cause: AdapterCause,
}

#[derive(Debug, Error)]
pub enum AdapterCause {
    #[error("unreachable: {0}")]
    Unreachable(String),
    #[error("malformed data: {0}")]
    Malformed(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("aborted: {0}")]
    Aborted(String),
}

impl AdapterCause {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdapterCause::Unreachable(_) => FailureKind::Unreachable,
            AdapterCause::Malformed(_) => FailureKind::Malformed,
            AdapterCause::TimedOut(_) => FailureKind::Timeout,
            AdapterCause::Aborted(_) => FailureKind::Aborted,
        }
    }
}

impl AdapterError {
    pub fn new(source_id: impl Into<String>, cause: AdapterCause) -> Self {
        Self {
            source_id: source_id.into(),
            cause,
        }
    }

    pub fn unreachable(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(source_id, AdapterCause::Unreachable(reason.to_string()))
    }

    pub fn malformed(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(source_id, AdapterCause::Malformed(reason.to_string()))
    }

    pub fn kind(&self) -> FailureKind {
        self.cause.kind()
    }
}

/// The snapshot could not be loaded or saved. Always fatal to the pass.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot I/O failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot at {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("snapshot backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("source id must not be empty")]
    EmptySourceId,
    #[error("duplicate source id `{0}`")]
    DuplicateSource(String),
    #[error("`{0}` must be greater than zero")]
    ZeroDuration(String),
    #[error("`{0}` is too large")]
    DurationOutOfRange(String),
}
