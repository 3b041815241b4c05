//! SQLite implementation of [`SessionRepository`].

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use renta_core::error::RentaResult;
use renta_core::models::session::{NewSession, Session};
use renta_core::repository::SessionRepository;

use crate::connection::DbManager;
use crate::error::db_err;

fn map_session(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        user_id: row.get(1)?,
        token: row.get(2)?,
        expires_at: row.get(3)?,
        ip_address: row.get(4)?,
        active: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// SQLite implementation of the Session repository.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    db: DbManager,
}

impl SqliteSessionRepository {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn create(&self, input: NewSession) -> RentaResult<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO sesiones (id_usuario, token, fecha_expiracion, direccion_ip, fecha_creacion)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.user_id,
                input.token,
                input.expires_at,
                input.ip_address,
                Utc::now(),
            ],
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_token(&self, token: &str) -> RentaResult<Option<Session>> {
        let conn = self.db.conn();
        conn.query_row(
            "SELECT id_sesion, id_usuario, token, fecha_expiracion, direccion_ip,
                    activa, fecha_creacion
             FROM sesiones WHERE token = ?1",
            params![token],
            map_session,
        )
        .optional()
        .map_err(db_err)
    }

    fn deactivate(&self, token: &str) -> RentaResult<bool> {
        let conn = self.db.conn();
        // Constrained to still-active rows: a closed session is never
        // reprocessed.
        let changed = conn
            .execute(
                "UPDATE sesiones SET activa = 0, fecha_expiracion = ?1
                 WHERE token = ?2 AND activa = 1",
                params![Utc::now(), token],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }
}
