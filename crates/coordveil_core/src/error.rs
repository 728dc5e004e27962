//! # Spoof Error Types
//!
//! Errors raised by the control path. The packet path never returns these;
//! it fails open instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring the spoofer.
#[derive(Error, Debug)]
pub enum SpoofError {
    /// An offset component was NaN or infinite. The previous offset is kept.
    #[error("offset {axis} component is not finite: {value}")]
    NonFiniteOffset {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// The rejected value.
        value: f64,
    },

    /// Jitter parameters were negative or not finite.
    #[error("invalid jitter: {0}")]
    InvalidJitter(String),

    /// Config text could not be parsed or rendered.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("config file {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for spoofer control operations.
pub type SpoofResult<T> = Result<T, SpoofError>;
