//! Centralized error types
//!
//! All application errors are represented by the `GrapherError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, GrapherError>`.
//! The decoder and series buffers never fail and do not use this type.

use std::fmt;
use std::path::PathBuf;

/// All application errors
#[derive(Debug)]
pub enum GrapherError {
    // === Transport ===
    /// Failed to open serial port
    SerialOpen {
        port: String,
        source: std::io::Error,
    },
    /// No serial port given on the command line or in the config
    NoPortConfigured,

    // === Config ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected schema
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Runtime ===
    /// Terminal or runtime setup failed
    Runtime { source: std::io::Error },
}

impl std::error::Error for GrapherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SerialOpen { source, .. }
            | Self::Io { source, .. }
            | Self::Runtime { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for GrapherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerialOpen { port, .. } => write!(f, "Cannot open serial port: {}", port),
            Self::NoPortConfigured => {
                write!(f, "No serial port configured (use --port or [serial] port)")
            }
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Runtime { .. } => write!(f, "Failed to initialize runtime"),
        }
    }
}

/// Alias for Result with GrapherError
pub type Result<T> = std::result::Result<T, GrapherError>;
