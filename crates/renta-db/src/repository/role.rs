//! SQLite implementation of [`RoleRepository`].

use rusqlite::{params, OptionalExtension};
use renta_core::error::RentaResult;
use renta_core::models::role::Role;
use renta_core::repository::RoleRepository;

use crate::connection::DbManager;
use crate::error::db_err;

/// SQLite implementation of the Role repository.
#[derive(Clone)]
pub struct SqliteRoleRepository {
    db: DbManager,
}

impl SqliteRoleRepository {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

impl RoleRepository for SqliteRoleRepository {
    fn find_by_name(&self, name: &str) -> RentaResult<Option<Role>> {
        let conn = self.db.conn();
        conn.query_row(
            "SELECT id_rol, nombre FROM roles WHERE nombre = ?1",
            params![name],
            |row| {
                Ok(Role {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(db_err)
    }

    fn list(&self) -> RentaResult<Vec<Role>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare("SELECT id_rol, nombre FROM roles ORDER BY id_rol")
            .map_err(db_err)?;
        let roles = stmt
            .query_map([], |row| {
                Ok(Role {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(roles)
    }
}
