//! Administrator account provisioning.

use anyhow::{Context, Result};
use renta_auth::password;
use renta_core::models::user::{NewUser, UserUpdate};
use renta_core::repository::{RoleRepository, UserRepository};
use tracing::info;

/// Make sure an administrator account exists and its password matches
/// the supplied one. If the username already exists its password hash
/// is reset; otherwise the account is created with the `admin` role.
/// Returns the account's row id.
pub fn ensure_admin<U: UserRepository, R: RoleRepository>(
    users: &U,
    roles: &R,
    username: &str,
    email: &str,
    password: &str,
) -> Result<i64> {
    let password_hash = password::hash_password(password)?;

    if let Some(existing) = users.find_by_username(username)? {
        users.update(
            existing.id,
            UserUpdate {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )?;
        info!(user_id = existing.id, username, "admin password reset");
        return Ok(existing.id);
    }

    let role = roles
        .find_by_name("admin")?
        .context("role \"admin\" is missing from the database")?;

    let user_id = users.create(NewUser {
        role_id: role.id,
        username: username.into(),
        email: email.into(),
        password_hash,
        given_name: "Admin".into(),
        family_name: "Sistema".into(),
    })?;
    info!(user_id, username, "admin account created");
    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renta_auth::password::verify_password;
    use renta_db::repository::{SqliteRoleRepository, SqliteUserRepository};
    use renta_db::{run_migrations, DbManager};

    fn setup() -> (SqliteUserRepository, SqliteRoleRepository) {
        let db = DbManager::in_memory().unwrap();
        run_migrations(&db).unwrap();
        (
            SqliteUserRepository::new(db.clone()),
            SqliteRoleRepository::new(db),
        )
    }

    #[test]
    fn creates_admin_when_missing() {
        let (users, roles) = setup();

        let id = ensure_admin(&users, &roles, "admin_user", "admin@secure.com", "admin123")
            .unwrap();

        let creds = users.find_credentials("admin_user").unwrap().unwrap();
        assert_eq!(creds.user_id, id);
        assert_eq!(creds.role, "admin");
        assert!(verify_password("admin123", &creds.password_hash).unwrap());
    }

    #[test]
    fn resets_password_when_admin_exists() {
        let (users, roles) = setup();

        let first = ensure_admin(&users, &roles, "admin_user", "admin@secure.com", "old-pass")
            .unwrap();
        let second = ensure_admin(&users, &roles, "admin_user", "admin@secure.com", "new-pass")
            .unwrap();
        assert_eq!(first, second);

        let creds = users.find_credentials("admin_user").unwrap().unwrap();
        assert!(!verify_password("old-pass", &creds.password_hash).unwrap());
        assert!(verify_password("new-pass", &creds.password_hash).unwrap());
    }
}
