//! SQLite implementation of [`LoginAttemptRepository`].

use chrono::Utc;
use rusqlite::params;
use renta_core::error::RentaResult;
use renta_core::models::login_attempt::{LoginAttempt, NewLoginAttempt};
use renta_core::repository::LoginAttemptRepository;

use crate::connection::DbManager;
use crate::error::db_err;

/// SQLite implementation of the login-attempt audit repository.
#[derive(Clone)]
pub struct SqliteLoginAttemptRepository {
    db: DbManager,
}

impl SqliteLoginAttemptRepository {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

impl LoginAttemptRepository for SqliteLoginAttemptRepository {
    fn record(&self, input: NewLoginAttempt) -> RentaResult<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO intentos_login (username, direccion_ip, exitoso, fecha)
             VALUES (?1, ?2, ?3, ?4)",
            params![input.username, input.ip_address, input.success, Utc::now()],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn list_for_username(&self, username: &str) -> RentaResult<Vec<LoginAttempt>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id_intento, username, direccion_ip, exitoso, fecha
                 FROM intentos_login WHERE username = ?1 ORDER BY id_intento",
            )
            .map_err(db_err)?;
        let attempts = stmt
            .query_map(params![username], |row| {
                Ok(LoginAttempt {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    ip_address: row.get(2)?,
                    success: row.get(3)?,
                    at: row.get(4)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(attempts)
    }
}
