//! Domain errors surfaced by the core services.

use soulmate_ai::AiError;
use thiserror::Error;

use crate::models::ValidationError;

/// Errors returned by the service layer.
///
/// Callers map the variants to transport-level statuses; storage failures
/// stay opaque behind `Storage`.
#[derive(Debug, Error)]
pub enum SoulmateError {
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Completion API error: {0}")]
    Upstream(#[from] AiError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl SoulmateError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SoulmateError::Validation(ValidationError::new(field, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        SoulmateError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        SoulmateError::NotFound(message.into())
    }
}

impl From<ValidationError> for SoulmateError {
    fn from(error: ValidationError) -> Self {
        SoulmateError::Validation(error)
    }
}

pub type Result<T> = std::result::Result<T, SoulmateError>;
