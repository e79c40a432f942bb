use std::path::PathBuf;

use thiserror::Error;

/// Failures of the vector math layer.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FlowError {
    /// Normalizing a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DivisionByZero,
}

/// Failures while loading or checking a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A value parsed fine but is outside its usable range.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}
