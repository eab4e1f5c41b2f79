//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{fallback, GatewayError, ValidationError};

// Re-export shared helpers for splitting bilingual messages
pub use vf_shared::errors::{extract_english_message, extract_korean_message, ErrorResponse};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type DomainResult<T> = Result<T, DomainError>;
