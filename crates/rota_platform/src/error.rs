//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// None of the offered style properties can animate transforms
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Vendor prefix name not recognized
    #[error("Unknown vendor prefix: {0}")]
    UnknownPrefix(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
