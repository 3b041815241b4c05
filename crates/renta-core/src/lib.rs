//! Renta Core — domain models, repository trait definitions, and the
//! shared error taxonomy for the vehicle rental back office.
//!
//! This crate has no I/O dependencies. The persistence crate implements
//! the repository traits; the authentication crate consumes them.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{RentaError, RentaResult};
