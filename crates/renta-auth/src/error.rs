//! Authentication error types.
//!
//! The `Display` text of each variant is the message the presentation
//! layer shows. `InvalidCredentials` deliberately does not distinguish
//! an unknown username from a wrong password (enumeration defense);
//! `System` carries fixed text — the underlying cause goes to the log,
//! never to the caller.

use renta_core::error::RentaError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("all fields are required")]
    MissingFields,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("email is already registered")]
    EmailTaken,

    #[error("role {0:?} is not valid")]
    UnknownRole(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("this account is disabled")]
    AccountDisabled,

    #[error("could not create session")]
    SessionCreate,

    #[error("internal error, please try again later")]
    System,
}

impl From<AuthError> for RentaError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields | AuthError::UnknownRole(_) => RentaError::Validation {
                message: err.to_string(),
            },
            AuthError::UsernameTaken => RentaError::Duplicate {
                field: "username".into(),
            },
            AuthError::EmailTaken => RentaError::Duplicate {
                field: "email".into(),
            },
            AuthError::InvalidCredentials | AuthError::AccountDisabled => {
                RentaError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::SessionCreate | AuthError::System => RentaError::Database(err.to_string()),
        }
    }
}
