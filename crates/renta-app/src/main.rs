//! Renta App — application bootstrap.
//!
//! Opens the database, applies migrations, and (when `ADMIN_USER` and
//! `ADMIN_PASSWORD` are set) provisions the administrator account. The
//! presentation layer runs against the database this prepares.

mod bootstrap;

use anyhow::Result;
use renta_db::repository::{SqliteRoleRepository, SqliteUserRepository};
use renta_db::{run_migrations, DbConfig, DbManager};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("renta=info".parse()?))
        .init();

    let db_config = DbConfig::from_env();
    let db = DbManager::open(&db_config)?;
    run_migrations(&db)?;
    info!("database ready");

    match (std::env::var("ADMIN_USER"), std::env::var("ADMIN_PASSWORD")) {
        (Ok(username), Ok(password)) => {
            let email = std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| format!("{username}@renta.local"));
            let users = SqliteUserRepository::new(db.clone());
            let roles = SqliteRoleRepository::new(db.clone());
            let user_id = bootstrap::ensure_admin(&users, &roles, &username, &email, &password)?;
            info!(user_id, "admin account ready");
        }
        _ => info!("ADMIN_USER/ADMIN_PASSWORD not set, skipping admin bootstrap"),
    }

    Ok(())
}
