//! Schema definitions and migration runner.
//!
//! Tables keep the legacy Spanish names and columns. Timestamps are
//! written from Rust as RFC 3339 text; booleans are stored as 0/1.

use rusqlite::params;
use tracing::info;

use crate::connection::DbManager;
use crate::error::DbError;

const MIGRATION_TABLE_DDL: &str = "\
CREATE TABLE IF NOT EXISTS _migration (
    version     INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
);";

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

const SCHEMA_V1: &str = "\
CREATE TABLE roles (
    id_rol  INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre  TEXT NOT NULL UNIQUE
);

CREATE TABLE usuarios (
    id_usuario     INTEGER PRIMARY KEY AUTOINCREMENT,
    id_rol         INTEGER NOT NULL REFERENCES roles(id_rol),
    username       TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    email          TEXT NOT NULL UNIQUE,
    nombre         TEXT NOT NULL,
    apellido       TEXT NOT NULL,
    telefono       TEXT,
    activo         INTEGER NOT NULL DEFAULT 1,
    ultimo_login   TEXT
);

CREATE TABLE sesiones (
    id_sesion         INTEGER PRIMARY KEY AUTOINCREMENT,
    id_usuario        INTEGER NOT NULL REFERENCES usuarios(id_usuario),
    token             TEXT NOT NULL UNIQUE,
    fecha_expiracion  TEXT NOT NULL,
    direccion_ip      TEXT NOT NULL,
    activa            INTEGER NOT NULL DEFAULT 1,
    fecha_creacion    TEXT NOT NULL
);
CREATE INDEX idx_sesiones_usuario ON sesiones(id_usuario);

CREATE TABLE intentos_login (
    id_intento    INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL,
    direccion_ip  TEXT NOT NULL,
    exitoso       INTEGER NOT NULL,
    fecha         TEXT NOT NULL
);
CREATE INDEX idx_intentos_username ON intentos_login(username);

CREATE TABLE marcas (
    id_marca  INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre    TEXT NOT NULL UNIQUE
);

CREATE TABLE modelos (
    id_modelo  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_marca   INTEGER NOT NULL REFERENCES marcas(id_marca),
    nombre     TEXT NOT NULL
);

CREATE TABLE vehiculos (
    id_vehiculo    INTEGER PRIMARY KEY AUTOINCREMENT,
    id_modelo      INTEGER NOT NULL REFERENCES modelos(id_modelo),
    placa          TEXT NOT NULL UNIQUE,
    anio           INTEGER NOT NULL,
    color          TEXT NOT NULL,
    kilometraje    INTEGER NOT NULL DEFAULT 0,
    precio_diario  REAL NOT NULL,
    estado         TEXT NOT NULL DEFAULT 'disponible'
        CHECK (estado IN ('disponible', 'alquilado', 'mantenimiento'))
);

INSERT INTO roles (nombre) VALUES ('admin'), ('empleado'), ('cliente');
";

/// Apply any migrations newer than the recorded schema version.
/// Idempotent: running against an up-to-date database is a no-op.
pub fn run_migrations(db: &DbManager) -> Result<(), DbError> {
    let conn = db.conn();
    conn.execute_batch(MIGRATION_TABLE_DDL).map_err(DbError::from)?;

    let current: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM _migration", [], |row| {
            row.get(0)
        })
        .map_err(DbError::from)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        conn.execute_batch(migration.sql)
            .map_err(|e| DbError::Migration(format!("{}: {e}", migration.name)))?;
        conn.execute(
            "INSERT INTO _migration (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )
        .map_err(DbError::from)?;
        info!(version = migration.version, name = migration.name, "applied migration");
    }

    Ok(())
}
