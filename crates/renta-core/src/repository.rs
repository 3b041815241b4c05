//! Repository trait definitions for data access abstraction.
//!
//! All operations are synchronous and blocking: the store is embedded
//! and every call maps to a single statement. Implementations must be
//! safe to invoke concurrently — they hold no mutable state beyond a
//! handle to the database.

use crate::error::RentaResult;
use crate::models::{
    login_attempt::{LoginAttempt, NewLoginAttempt},
    role::Role,
    session::{NewSession, Session},
    user::{Account, ClientOption, Credentials, NewUser, User, UserUpdate},
    vehicle::{AvailableVehicle, FleetVehicle, ModelOption, NewVehicle, VehicleStatus},
};

pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its row id. A storage-level
    /// uniqueness violation on username or email surfaces as
    /// [`RentaError::Duplicate`](crate::error::RentaError) and is the
    /// authoritative duplicate signal under concurrent registration.
    fn create(&self, input: NewUser) -> RentaResult<i64>;

    fn find_by_username(&self, username: &str) -> RentaResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> RentaResult<Option<User>>;

    /// The login lookup: user joined with its role name.
    fn find_credentials(&self, username: &str) -> RentaResult<Option<Credentials>>;

    /// Set the last-login timestamp to now.
    fn touch_last_login(&self, id: i64) -> RentaResult<()>;

    /// Administrative update (phone, activation flag, password hash).
    fn update(&self, id: i64, input: UserUpdate) -> RentaResult<()>;

    /// All accounts joined with role names, ordered by role then
    /// family name (the management listing).
    fn list_accounts(&self) -> RentaResult<Vec<Account>>;

    /// Active users with the "cliente" role (the rental dropdown).
    fn list_active_clients(&self) -> RentaResult<Vec<ClientOption>>;
}

pub trait RoleRepository: Send + Sync {
    fn find_by_name(&self, name: &str) -> RentaResult<Option<Role>>;
    fn list(&self) -> RentaResult<Vec<Role>>;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: NewSession) -> RentaResult<i64>;

    fn find_by_token(&self, token: &str) -> RentaResult<Option<Session>>;

    /// Close the session holding `token`: clear its active flag and
    /// pull its expiry to now, constrained to rows that are still
    /// active. Returns whether a row changed.
    fn deactivate(&self, token: &str) -> RentaResult<bool>;
}

pub trait LoginAttemptRepository: Send + Sync {
    /// Append one attempt record. Attempts are never mutated or
    /// deleted.
    fn record(&self, input: NewLoginAttempt) -> RentaResult<()>;

    fn list_for_username(&self, username: &str) -> RentaResult<Vec<LoginAttempt>>;
}

pub trait VehicleRepository: Send + Sync {
    fn add_brand(&self, name: &str) -> RentaResult<i64>;
    fn add_model(&self, brand_id: i64, name: &str) -> RentaResult<i64>;

    /// Insert a vehicle and return its row id. A duplicate plate
    /// surfaces as a duplicate error from the storage constraint.
    fn create(&self, input: NewVehicle) -> RentaResult<i64>;

    fn set_status(&self, id: i64, status: VehicleStatus) -> RentaResult<()>;

    /// The whole fleet joined with model and brand names, ordered by
    /// brand then model.
    fn list_fleet(&self) -> RentaResult<Vec<FleetVehicle>>;

    /// Vehicles currently available for rental.
    fn list_available(&self) -> RentaResult<Vec<AvailableVehicle>>;

    /// "Brand Model" entries for the add-vehicle dropdown.
    fn list_model_options(&self) -> RentaResult<Vec<ModelOption>>;
}
