//! Domain models for the rental back office.
//!
//! Physical storage keeps the legacy Spanish table and column names;
//! these types are their idiomatic Rust counterparts.

pub mod login_attempt;
pub mod role;
pub mod session;
pub mod user;
pub mod vehicle;
