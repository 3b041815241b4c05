//! Error types shared across the workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentaError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("duplicate value for {field}")]
    Duplicate { field: String },

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

pub type RentaResult<T> = Result<T, RentaError>;
