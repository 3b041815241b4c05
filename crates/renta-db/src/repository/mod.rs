//! SQLite implementations of the `renta-core` repository traits.

mod login_attempt;
mod role;
mod session;
mod user;
mod vehicle;

pub use login_attempt::SqliteLoginAttemptRepository;
pub use role::SqliteRoleRepository;
pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;
pub use vehicle::SqliteVehicleRepository;
