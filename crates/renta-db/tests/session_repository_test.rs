//! Session and login-attempt repository integration tests.

use chrono::{Duration, Utc};
use renta_core::models::login_attempt::NewLoginAttempt;
use renta_core::models::session::NewSession;
use renta_core::models::user::NewUser;
use renta_core::repository::{
    LoginAttemptRepository, RoleRepository, SessionRepository, UserRepository,
};
use renta_db::repository::{
    SqliteLoginAttemptRepository, SqliteRoleRepository, SqliteSessionRepository,
    SqliteUserRepository,
};
use renta_db::{run_migrations, DbManager};

fn setup() -> (DbManager, SqliteSessionRepository, i64) {
    let db = DbManager::in_memory().unwrap();
    run_migrations(&db).unwrap();

    let role = SqliteRoleRepository::new(db.clone())
        .find_by_name("cliente")
        .unwrap()
        .unwrap();
    let user_id = SqliteUserRepository::new(db.clone())
        .create(NewUser {
            role_id: role.id,
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$fake$hash".into(),
            given_name: "Alice".into(),
            family_name: "Doe".into(),
        })
        .unwrap();

    let sessions = SqliteSessionRepository::new(db.clone());
    (db, sessions, user_id)
}

fn new_session(user_id: i64, token: &str) -> NewSession {
    NewSession {
        user_id,
        token: token.into(),
        expires_at: Utc::now() + Duration::hours(8),
        ip_address: "10.0.0.1".into(),
    }
}

#[test]
fn create_and_find_by_token() {
    let (_db, sessions, user_id) = setup();

    let id = sessions.create(new_session(user_id, "tok-1")).unwrap();
    assert!(id > 0);

    let row = sessions.find_by_token("tok-1").unwrap().unwrap();
    assert_eq!(row.id, id);
    assert_eq!(row.user_id, user_id);
    assert_eq!(row.ip_address, "10.0.0.1");
    assert!(row.active);
    assert!(row.expires_at > Utc::now());

    assert!(sessions.find_by_token("tok-x").unwrap().is_none());
}

#[test]
fn duplicate_token_rejected_by_constraint() {
    let (_db, sessions, user_id) = setup();

    sessions.create(new_session(user_id, "tok-1")).unwrap();
    assert!(sessions.create(new_session(user_id, "tok-1")).is_err());
}

#[test]
fn deactivate_closes_once() {
    let (_db, sessions, user_id) = setup();

    sessions.create(new_session(user_id, "tok-1")).unwrap();
    assert!(sessions.deactivate("tok-1").unwrap());

    let row = sessions.find_by_token("tok-1").unwrap().unwrap();
    assert!(!row.active);
    // Expiry is pulled to the moment of the logout.
    assert!(row.expires_at <= Utc::now());

    // Already closed: nothing to do.
    assert!(!sessions.deactivate("tok-1").unwrap());
    assert!(!sessions.deactivate("tok-unknown").unwrap());
}

#[test]
fn attempts_are_append_only_and_filtered_by_username() {
    let (db, _sessions, _user_id) = setup();
    let attempts = SqliteLoginAttemptRepository::new(db);

    for (user, ok) in [("alice", false), ("ghost", false), ("alice", true)] {
        attempts
            .record(NewLoginAttempt {
                username: user.into(),
                ip_address: "10.0.0.1".into(),
                success: ok,
            })
            .unwrap();
    }

    let alice = attempts.list_for_username("alice").unwrap();
    assert_eq!(alice.len(), 2);
    assert!(!alice[0].success);
    assert!(alice[1].success);
    assert!(alice[0].id < alice[1].id);

    let ghost = attempts.list_for_username("ghost").unwrap();
    assert_eq!(ghost.len(), 1);
    assert_eq!(ghost[0].username, "ghost");
}
