//! Error types for the scorer ABI

use thiserror::Error;

/// Main error type for scorer operations.
///
/// Every fallible operation of the ABI reports one of these. Errors are never
/// retried internally; they propagate straight to the caller, and any output
/// buffer involved in the failed operation must not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScorerError {
    /// Input value cannot be decoded into a supported code-unit width
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Keyword/parameter set is invalid or internally contradictory
    #[error("Configuration error: {0}")]
    Config(String),

    /// Needle or haystack batch is malformed, or a batch is used without
    /// the matching capability flag
    #[error("Construction error: {0}")]
    Construction(String),

    /// Struct version outside the range this host understands
    #[error("Unsupported version {found} (supported: {min}..={max})")]
    UnsupportedVersion { found: u32, min: u32, max: u32 },
}

/// Result type alias for scorer operations
pub type Result<T> = std::result::Result<T, ScorerError>;
