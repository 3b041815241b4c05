//! Renta Auth — registration, login, logout, and session validity.
//!
//! The service orchestrates the repository traits from `renta-core`;
//! it holds no state of its own beyond configuration, so it is safe to
//! call from any number of presentation-layer windows at once.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput, SessionInfo};
