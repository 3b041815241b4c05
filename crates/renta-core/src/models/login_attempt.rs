//! Login attempt audit model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An append-only audit record (`intentos_login` table). The username
/// is recorded as typed, whether or not such a user exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub id: i64,
    pub username: String,
    pub ip_address: String,
    pub success: bool,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoginAttempt {
    pub username: String,
    pub ip_address: String,
    pub success: bool,
}
