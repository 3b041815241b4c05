//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proof of authenticated state (`sesiones` table).
///
/// A session is valid iff `active` is true and the current time
/// precedes `expires_at`. Expiry is never swept by a background task;
/// consumers evaluate both conditions at check time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    /// Opaque random token, unique across all sessions.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: String,
}
