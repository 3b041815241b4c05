//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account as stored in `usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub role_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    /// Soft-deactivation flag. Inactive users never authenticate.
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

/// Input for creating a user. The password arrives already hashed —
/// hashing is the authentication layer's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub role_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub given_name: String,
    pub family_name: String,
}

/// Administrative update. Accounts are never physically deleted;
/// deactivation happens through `active`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub phone: Option<Option<String>>,
    pub active: Option<bool>,
    pub password_hash: Option<String>,
}

/// The credential row the login flow works from: the user joined with
/// its role name.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
    pub active: bool,
    pub role: String,
}

/// A management-listing row (user joined with role name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub active: bool,
    pub role: String,
}

/// Dropdown entry for selecting a rental client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientOption {
    pub id: i64,
    pub display_name: String,
}
