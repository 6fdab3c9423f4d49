//! Error types for the build monitor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid branch: {0}")]
    InvalidBranch(String),

    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("there are no branches in {0} application")]
    NoBranches(String),

    #[error("there are no configured branches in {0} application")]
    NoConfiguredBranches(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
