//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime in seconds (default: 28_800 = 8 hours).
    pub session_lifetime_secs: u64,
    /// Role assigned to registrations that do not name one.
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_secs: 8 * 3600,
            default_role: "cliente".into(),
        }
    }
}
