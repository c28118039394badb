//! Error types for TarangIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of a sequence-file write session, reported on failure so the
/// caller can tell the user which part of the file could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// The text header block
    Header,
    /// Per-frame transform/status/timestamp metadata
    Transforms,
    /// Concatenated binary image payload
    Images,
}

impl std::fmt::Display for WritePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WritePhase::Header => write!(f, "header"),
            WritePhase::Transforms => write!(f, "transform"),
            WritePhase::Images => write!(f, "image"),
        }
    }
}

/// TarangIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed header or file structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// File declares a feature this crate does not decode
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure during a specific phase of a sequence-file write session
    #[error("Sequence {phase} write failed: {source}")]
    Write {
        /// Which write phase failed
        phase: WritePhase,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
