//! Error taxonomy for formula generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormulaError {
    /// A required input was unset or empty.
    #[error("missing input: {input} (set {env})")]
    MissingInput {
        input: &'static str,
        env: &'static str,
    },

    /// The formula could not be written (permission denied, parent directory missing, ...).
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rendered download URL did not parse, or only parsed after normalization
    /// (stray whitespace or control characters). `source` is set in the first case.
    #[error("invalid download url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// Settings file could not be read or parsed.
    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FormulaError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormulaError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormulaError>;
