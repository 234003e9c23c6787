use axum::http::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the return-notification operation.
///
/// Per-channel send failures (email/SMS transport rejections) never appear
/// here; they are reported through the booleans and error text inside
/// `NotificationResult`. These variants cover request validation, entity
/// lookup misses, template assembly, and collaborator transport faults.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidPayload(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Template Data ({0}) is empty!")]
    Template(String),

    #[error("Collaborator lookup failed: {0}")]
    Lookup(#[from] anyhow::Error),
}

impl OperationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OperationError::Validation(_)
            | OperationError::InvalidPayload(_)
            | OperationError::NotFound(_) => StatusCode::BAD_REQUEST,
            OperationError::Template(_) | OperationError::Lookup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
