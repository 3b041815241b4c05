//! Integration tests for the authentication service against an
//! in-memory database.

use renta_auth::config::AuthConfig;
use renta_auth::error::AuthError;
use renta_auth::service::{AuthService, LoginInput, RegisterInput};
use renta_core::models::user::UserUpdate;
use renta_core::repository::{LoginAttemptRepository, SessionRepository, UserRepository};
use renta_db::repository::{
    SqliteLoginAttemptRepository, SqliteRoleRepository, SqliteSessionRepository,
    SqliteUserRepository,
};
use renta_db::DbManager;

type Service = AuthService<
    SqliteUserRepository,
    SqliteRoleRepository,
    SqliteSessionRepository,
    SqliteLoginAttemptRepository,
>;

fn setup_with(config: AuthConfig) -> (Service, DbManager) {
    let db = DbManager::in_memory().unwrap();
    renta_db::run_migrations(&db).unwrap();
    let svc = AuthService::new(
        SqliteUserRepository::new(db.clone()),
        SqliteRoleRepository::new(db.clone()),
        SqliteSessionRepository::new(db.clone()),
        SqliteLoginAttemptRepository::new(db.clone()),
        config,
    );
    (svc, db)
}

fn setup() -> (Service, DbManager) {
    setup_with(AuthConfig::default())
}

fn register_input(username: &str, email: &str) -> RegisterInput {
    RegisterInput {
        username: username.into(),
        password: "Secr3t!pass".into(),
        email: email.into(),
        given_name: "Alice".into(),
        family_name: "Doe".into(),
        role: None,
    }
}

fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.into(),
        password: password.into(),
        ip_address: "10.0.0.1".into(),
    }
}

#[test]
fn register_then_login_succeeds() {
    let (svc, _db) = setup();

    let user_id = svc.register(register_input("alice", "alice@x.com")).unwrap();
    assert!(user_id > 0);

    let out = svc.login(login_input("alice", "Secr3t!pass")).unwrap();
    assert_eq!(out.user_id, user_id);
    assert_eq!(out.role, "cliente");
    assert!(!out.token.is_empty());
}

#[test]
fn register_rejects_empty_fields() {
    let (svc, _db) = setup();

    let mut input = register_input("alice", "alice@x.com");
    input.family_name = "".into();
    assert_eq!(svc.register(input).unwrap_err(), AuthError::MissingFields);

    let mut input = register_input("alice", "alice@x.com");
    input.password = "  ".into();
    assert_eq!(svc.register(input).unwrap_err(), AuthError::MissingFields);
}

#[test]
fn duplicate_username_creates_no_second_row() {
    let (svc, db) = setup();

    svc.register(register_input("alice", "alice@x.com")).unwrap();
    let err = svc
        .register(register_input("alice", "other@x.com"))
        .unwrap_err();
    assert_eq!(err, AuthError::UsernameTaken);

    let users = SqliteUserRepository::new(db);
    assert!(users.find_by_email("other@x.com").unwrap().is_none());
}

#[test]
fn duplicate_email_rejected() {
    let (svc, _db) = setup();

    svc.register(register_input("alice", "alice@x.com")).unwrap();
    let err = svc
        .register(register_input("bob", "alice@x.com"))
        .unwrap_err();
    assert_eq!(err, AuthError::EmailTaken);
}

#[test]
fn unknown_role_rejected_even_though_default_exists() {
    let (svc, _db) = setup();

    let mut input = register_input("alice", "alice@x.com");
    input.role = Some("superuser".into());
    let err = svc.register(input).unwrap_err();
    assert_eq!(err, AuthError::UnknownRole("superuser".into()));
}

#[test]
fn explicit_role_is_honored() {
    let (svc, _db) = setup();

    let mut input = register_input("boss", "boss@x.com");
    input.role = Some("admin".into());
    svc.register(input).unwrap();

    let out = svc.login(login_input("boss", "Secr3t!pass")).unwrap();
    assert_eq!(out.role, "admin");
}

#[test]
fn unknown_user_and_wrong_password_are_indistinguishable() {
    let (svc, db) = setup();

    svc.register(register_input("alice", "alice@x.com")).unwrap();

    let ghost_err = svc.login(login_input("ghost", "whatever")).unwrap_err();
    let wrong_err = svc.login(login_input("alice", "wrong")).unwrap_err();
    assert_eq!(ghost_err.to_string(), wrong_err.to_string());

    // Both paths append a failed attempt row under the typed username.
    let attempts = SqliteLoginAttemptRepository::new(db);
    let ghost = attempts.list_for_username("ghost").unwrap();
    assert_eq!(ghost.len(), 1);
    assert!(!ghost[0].success);
    assert_eq!(ghost[0].ip_address, "10.0.0.1");

    let alice = attempts.list_for_username("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert!(!alice[0].success);
}

#[test]
fn disabled_account_never_authenticates() {
    let (svc, db) = setup();

    let user_id = svc.register(register_input("alice", "alice@x.com")).unwrap();
    let users = SqliteUserRepository::new(db.clone());
    users
        .update(
            user_id,
            UserUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

    // Correct password, still rejected — with a message distinct from
    // the generic credentials failure.
    let err = svc.login(login_input("alice", "Secr3t!pass")).unwrap_err();
    assert_eq!(err, AuthError::AccountDisabled);
    assert_ne!(
        err.to_string(),
        AuthError::InvalidCredentials.to_string()
    );

    let attempts = SqliteLoginAttemptRepository::new(db);
    let rows = attempts.list_for_username("alice").unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].success);
}

#[test]
fn login_records_success_attempt_and_last_login() {
    let (svc, db) = setup();

    svc.register(register_input("alice", "alice@x.com")).unwrap();
    svc.login(login_input("alice", "Secr3t!pass")).unwrap();

    let attempts = SqliteLoginAttemptRepository::new(db.clone());
    let rows = attempts.list_for_username("alice").unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].success);

    let users = SqliteUserRepository::new(db);
    let alice = users.find_by_username("alice").unwrap().unwrap();
    assert!(alice.last_login.is_some());
}

#[test]
fn token_is_valid_until_logout_and_logout_is_idempotent() {
    let (svc, _db) = setup();

    svc.register(register_input("alice", "alice@x.com")).unwrap();
    let out = svc.login(login_input("alice", "Secr3t!pass")).unwrap();

    let info = svc.validate_session(&out.token).unwrap().unwrap();
    assert_eq!(info.user_id, out.user_id);

    assert!(svc.logout(&out.token));
    assert!(svc.validate_session(&out.token).unwrap().is_none());

    // Second logout: no-op success.
    assert!(svc.logout(&out.token));
}

#[test]
fn logout_of_unknown_token_reports_success() {
    let (svc, _db) = setup();
    assert!(svc.logout("never-issued"));
}

#[test]
fn expired_session_is_invalid_and_lazily_closed() {
    let (svc, db) = setup_with(AuthConfig {
        session_lifetime_secs: 0,
        ..Default::default()
    });

    svc.register(register_input("alice", "alice@x.com")).unwrap();
    let out = svc.login(login_input("alice", "Secr3t!pass")).unwrap();

    assert!(svc.validate_session(&out.token).unwrap().is_none());

    // The expired row was closed during the check.
    let sessions = SqliteSessionRepository::new(db);
    let row = sessions.find_by_token(&out.token).unwrap().unwrap();
    assert!(!row.active);
}

#[test]
fn full_scenario_alice() {
    let (svc, _db) = setup();

    let input = RegisterInput {
        username: "alice".into(),
        password: "Secr3t!".into(),
        email: "alice@x.com".into(),
        given_name: "Alice".into(),
        family_name: "Doe".into(),
        role: None,
    };
    let user_id = svc.register(input).unwrap();
    assert_eq!(user_id, 1);

    let out = svc.login(login_input("alice", "Secr3t!")).unwrap();
    assert_eq!(out.role, "cliente");
    assert!(!out.token.is_empty());

    assert!(svc.logout(&out.token));
    assert!(svc.validate_session(&out.token).unwrap().is_none());
}
