//! SQLite implementation of [`UserRepository`].

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use renta_core::error::{RentaError, RentaResult};
use renta_core::models::user::{
    Account, ClientOption, Credentials, NewUser, User, UserUpdate,
};
use renta_core::repository::UserRepository;

use crate::connection::DbManager;
use crate::error::db_err;

const USER_COLUMNS: &str = "id_usuario, id_rol, username, email, password_hash, \
     nombre, apellido, telefono, activo, ultimo_login";

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        role_id: row.get(1)?,
        username: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        given_name: row.get(5)?,
        family_name: row.get(6)?,
        phone: row.get(7)?,
        active: row.get(8)?,
        last_login: row.get(9)?,
    })
}

/// SQLite implementation of the User repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    db: DbManager,
}

impl SqliteUserRepository {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, input: NewUser) -> RentaResult<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO usuarios (id_rol, username, password_hash, email, nombre, apellido)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.role_id,
                input.username,
                input.password_hash,
                input.email,
                input.given_name,
                input.family_name,
            ],
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_username(&self, username: &str) -> RentaResult<Option<User>> {
        let conn = self.db.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM usuarios WHERE username = ?1"),
            params![username],
            map_user,
        )
        .optional()
        .map_err(db_err)
    }

    fn find_by_email(&self, email: &str) -> RentaResult<Option<User>> {
        let conn = self.db.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM usuarios WHERE email = ?1"),
            params![email],
            map_user,
        )
        .optional()
        .map_err(db_err)
    }

    fn find_credentials(&self, username: &str) -> RentaResult<Option<Credentials>> {
        let conn = self.db.conn();
        conn.query_row(
            "SELECT u.id_usuario, u.password_hash, u.activo, r.nombre
             FROM usuarios u
             JOIN roles r ON u.id_rol = r.id_rol
             WHERE u.username = ?1",
            params![username],
            |row| {
                Ok(Credentials {
                    user_id: row.get(0)?,
                    password_hash: row.get(1)?,
                    active: row.get(2)?,
                    role: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(db_err)
    }

    fn touch_last_login(&self, id: i64) -> RentaResult<()> {
        let conn = self.db.conn();
        conn.execute(
            "UPDATE usuarios SET ultimo_login = ?1 WHERE id_usuario = ?2",
            params![Utc::now(), id],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn update(&self, id: i64, input: UserUpdate) -> RentaResult<()> {
        let conn = self.db.conn();
        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM usuarios WHERE id_usuario = ?1",
                params![id],
                |_| Ok(true),
            )
            .optional()
            .map_err(db_err)?
            .unwrap_or(false);
        if !exists {
            return Err(RentaError::NotFound {
                entity: "usuario".into(),
                id: id.to_string(),
            });
        }

        if let Some(phone) = input.phone {
            conn.execute(
                "UPDATE usuarios SET telefono = ?1 WHERE id_usuario = ?2",
                params![phone, id],
            )
            .map_err(db_err)?;
        }
        if let Some(active) = input.active {
            conn.execute(
                "UPDATE usuarios SET activo = ?1 WHERE id_usuario = ?2",
                params![active, id],
            )
            .map_err(db_err)?;
        }
        if let Some(hash) = input.password_hash {
            conn.execute(
                "UPDATE usuarios SET password_hash = ?1 WHERE id_usuario = ?2",
                params![hash, id],
            )
            .map_err(db_err)?;
        }
        Ok(())
    }

    fn list_accounts(&self) -> RentaResult<Vec<Account>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT u.id_usuario, u.username, u.email, u.nombre, u.apellido,
                        u.telefono, u.activo, r.nombre
                 FROM usuarios u
                 JOIN roles r ON u.id_rol = r.id_rol
                 ORDER BY u.id_rol, u.apellido",
            )
            .map_err(db_err)?;
        let accounts = stmt
            .query_map([], |row| {
                Ok(Account {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    given_name: row.get(3)?,
                    family_name: row.get(4)?,
                    phone: row.get(5)?,
                    active: row.get(6)?,
                    role: row.get(7)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(accounts)
    }

    fn list_active_clients(&self) -> RentaResult<Vec<ClientOption>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT u.id_usuario,
                        u.nombre || ' ' || u.apellido || ' (' || u.username || ')'
                 FROM usuarios u
                 JOIN roles r ON u.id_rol = r.id_rol
                 WHERE r.nombre = 'cliente' AND u.activo = 1
                 ORDER BY u.apellido",
            )
            .map_err(db_err)?;
        let clients = stmt
            .query_map([], |row| {
                Ok(ClientOption {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(clients)
    }
}
