//! Error types for slingshot
//!
//! None of these are fatal to a flight: callers in the game glue log them and
//! fall back to a safe default (new game, default config, skipped save).

use thiserror::Error;

/// Result type for fallible slingshot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the deterministic simulation
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Negative level index: {0}")]
    NegativeLevelIndex(i32),

    #[error("Invalid level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
