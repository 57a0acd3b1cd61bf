//! # AppError
//!
//! Centralized error handling for the Trailhead ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all th-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A dataset or config file is missing on disk.
    #[error("data file not found: {0}")]
    MissingDataFile(String),

    /// A dataset or config file exists but does not parse.
    #[error("malformed JSON in {0}: {1}")]
    MalformedData(String, String),

    /// Dataset-level validation failure (duplicate ids, bad coordinates).
    #[error("validation error: {0}")]
    Validation(String),

    /// Upstream API failure (NPS, Overpass).
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// Missing or unusable configuration (e.g. NPS_API_KEY unset).
    #[error("configuration error: {0}")]
    Config(String),

    /// Anything else that should not bubble to a caller as-is.
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Trailhead logic.
pub type Result<T> = std::result::Result<T, AppError>;
