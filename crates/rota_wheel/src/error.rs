//! Wheel error types
//!
//! Interaction operations never fail loudly: they return `Option`/`bool` and
//! leave the wheel unchanged. Errors only surface while building a wheel from
//! configuration.

use thiserror::Error;

/// Wheel configuration errors
#[derive(Error, Debug)]
pub enum WheelError {
    /// Config file could not be parsed
    #[error("Failed to parse wheel config: {0}")]
    Config(#[from] toml::de::Error),

    /// An option holds a value the engine cannot work with
    #[error("Invalid option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },
}

/// Result type for wheel operations
pub type Result<T> = std::result::Result<T, WheelError>;
