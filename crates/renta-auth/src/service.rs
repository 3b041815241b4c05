//! Authentication service — registration, login, and logout
//! orchestration.

use chrono::{DateTime, Duration, Utc};
use renta_core::error::RentaError;
use renta_core::models::login_attempt::NewLoginAttempt;
use renta_core::models::session::NewSession;
use renta_core::models::user::NewUser;
use renta_core::repository::{
    LoginAttemptRepository, RoleRepository, SessionRepository, UserRepository,
};
use tracing::{debug, error, info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow. `role` defaults to the configured
/// default ("cliente") when absent; an explicitly named unknown role
/// is rejected, never silently replaced.
#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub role: Option<String>,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub ip_address: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: i64,
    /// Role name, for presentation-layer routing.
    pub role: String,
    /// The raw session token (returned to the caller, stored verbatim).
    pub token: String,
}

/// What a valid session proves: who, and until when.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service.
///
/// Generic over repository implementations so that this crate has no
/// dependency on the database crate. Holds no mutable state — all
/// state lives in the persistence layer.
pub struct AuthService<U, R, S, A>
where
    U: UserRepository,
    R: RoleRepository,
    S: SessionRepository,
    A: LoginAttemptRepository,
{
    user_repo: U,
    role_repo: R,
    session_repo: S,
    attempt_repo: A,
    config: AuthConfig,
}

impl<U, R, S, A> AuthService<U, R, S, A>
where
    U: UserRepository,
    R: RoleRepository,
    S: SessionRepository,
    A: LoginAttemptRepository,
{
    pub fn new(
        user_repo: U,
        role_repo: R,
        session_repo: S,
        attempt_repo: A,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            session_repo,
            attempt_repo,
            config,
        }
    }

    /// Register a new user. Returns the new row id. No session is
    /// created by registration.
    pub fn register(&self, input: RegisterInput) -> Result<i64, AuthError> {
        // 1. Required fields.
        let required = [
            &input.username,
            &input.password,
            &input.email,
            &input.given_name,
            &input.family_name,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(AuthError::MissingFields);
        }

        // 2. Pre-checks produce the specific messages; the insert
        //    below remains the authoritative guard under races.
        if self
            .user_repo
            .find_by_username(&input.username)
            .map_err(|e| self.system("register: username lookup", e))?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }
        if self
            .user_repo
            .find_by_email(&input.email)
            .map_err(|e| self.system("register: email lookup", e))?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        // 3. Resolve the role name.
        let role_name = input
            .role
            .unwrap_or_else(|| self.config.default_role.clone());
        let role = self
            .role_repo
            .find_by_name(&role_name)
            .map_err(|e| self.system("register: role lookup", e))?
            .ok_or_else(|| AuthError::UnknownRole(role_name.clone()))?;

        // 4. Hash and insert.
        let password_hash = password::hash_password(&input.password)
            .map_err(|e| self.system("register: password hash", e))?;

        let user_id = self
            .user_repo
            .create(NewUser {
                role_id: role.id,
                username: input.username.clone(),
                email: input.email,
                password_hash,
                given_name: input.given_name,
                family_name: input.family_name,
            })
            .map_err(|e| match e {
                RentaError::Duplicate { ref field } if field.ends_with("username") => {
                    AuthError::UsernameTaken
                }
                RentaError::Duplicate { ref field } if field.ends_with("email") => {
                    AuthError::EmailTaken
                }
                other => self.system("register: insert", other),
            })?;

        info!(user_id, username = %input.username, role = %role.name, "user registered");
        Ok(user_id)
    }

    /// Authenticate a user and open a session.
    ///
    /// Every call appends exactly one attempt record before returning,
    /// whether or not the username exists.
    pub fn login(&self, input: LoginInput) -> Result<LoginOutput, AuthError> {
        // 1. Look up user joined with role name.
        let creds = self
            .user_repo
            .find_credentials(&input.username)
            .map_err(|e| self.system("login: credential lookup", e))?;

        let Some(creds) = creds else {
            self.record_attempt(&input.username, &input.ip_address, false);
            // Unknown user costs the same as a wrong password.
            password::dummy_verify(&input.password);
            return Err(AuthError::InvalidCredentials);
        };

        // 2. Deactivated accounts never authenticate, with a message
        //    distinct from the credentials failure.
        if !creds.active {
            self.record_attempt(&input.username, &input.ip_address, false);
            return Err(AuthError::AccountDisabled);
        }

        // 3. Verify the password.
        let valid = password::verify_password(&input.password, &creds.password_hash)
            .map_err(|e| self.system("login: password verify", e))?;
        if !valid {
            self.record_attempt(&input.username, &input.ip_address, false);
            return Err(AuthError::InvalidCredentials);
        }

        self.record_attempt(&input.username, &input.ip_address, true);

        // 4. Open the session. A persistence failure here is a failed
        //    login — the correct password does not stand in for a
        //    session.
        let session_token = token::generate_session_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_lifetime_secs as i64);
        self.session_repo
            .create(NewSession {
                user_id: creds.user_id,
                token: session_token.clone(),
                expires_at,
                ip_address: input.ip_address.clone(),
            })
            .map_err(|e| {
                error!(error = %e, user_id = creds.user_id, "login: session insert failed");
                AuthError::SessionCreate
            })?;

        if let Err(e) = self.user_repo.touch_last_login(creds.user_id) {
            warn!(error = %e, user_id = creds.user_id, "login: last-login update failed");
        }

        info!(user_id = creds.user_id, role = %creds.role, "login succeeded");
        Ok(LoginOutput {
            user_id: creds.user_id,
            role: creds.role,
            token: session_token,
        })
    }

    /// Close the session holding `token`. Idempotent: an unknown or
    /// already-closed token is a no-op success.
    pub fn logout(&self, session_token: &str) -> bool {
        match self.session_repo.deactivate(session_token) {
            Ok(closed) => debug!(closed, "logout"),
            Err(e) => error!(error = %e, "logout: session deactivation failed"),
        }
        true
    }

    /// Check whether `token` proves a live session: active and
    /// unexpired at this instant. Expiry is never swept proactively; a
    /// row found active past its expiry is closed here.
    pub fn validate_session(&self, session_token: &str) -> Result<Option<SessionInfo>, AuthError> {
        let session = self
            .session_repo
            .find_by_token(session_token)
            .map_err(|e| self.system("validate: session lookup", e))?;

        let Some(session) = session else {
            return Ok(None);
        };
        if !session.active {
            return Ok(None);
        }
        if Utc::now() >= session.expires_at {
            if let Err(e) = self.session_repo.deactivate(session_token) {
                warn!(error = %e, "validate: lazy deactivation failed");
            }
            return Ok(None);
        }

        Ok(Some(SessionInfo {
            user_id: session.user_id,
            expires_at: session.expires_at,
        }))
    }

    /// Append one attempt record; a failure to write the audit row is
    /// logged but does not change the call's outcome.
    fn record_attempt(&self, username: &str, ip_address: &str, success: bool) {
        let attempt = NewLoginAttempt {
            username: username.to_string(),
            ip_address: ip_address.to_string(),
            success,
        };
        if let Err(e) = self.attempt_repo.record(attempt) {
            error!(error = %e, username, "failed to record login attempt");
        }
    }

    /// Log the full cause, hand the caller the fixed sanitized error.
    fn system(&self, op: &'static str, err: RentaError) -> AuthError {
        error!(error = %err, op, "persistence failure");
        AuthError::System
    }
}
