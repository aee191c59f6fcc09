//! # AppError
//!
//! Centralized error handling for the explorer.
//! Maps backend and input failures to actionable error types.

use thiserror::Error;

use crate::format::DayParseError;

/// The primary error type for all bb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// The backend answered 404 for a resource (e.g., Board, Bulletin, Block)
    #[error("{0} not found at {1}")]
    NotFound(String, String),

    /// The backend answered with any other non-2xx status
    #[error("backend returned {status} for {path}")]
    Status { status: u16, path: String },

    /// Network failure, timeout, or connection refused
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected
    #[error("could not decode response from {path}: {reason}")]
    Decode { path: String, reason: String },

    /// A `/blocks/:day` segment that is not `DD-MM-YYYY`
    #[error(transparent)]
    InvalidDay(#[from] DayParseError),

    /// Misconfiguration or anything else that should not happen
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for explorer logic.
pub type Result<T> = std::result::Result<T, AppError>;
