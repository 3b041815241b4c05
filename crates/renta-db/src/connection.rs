//! SQLite connection management.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use tracing::info;

use crate::error::DbError;

/// Configuration for opening the database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: "renta_autos.db".into(),
        }
    }
}

impl DbConfig {
    /// Read the configuration from the environment (`DB_PATH`),
    /// falling back to the default path.
    pub fn from_env() -> Self {
        match std::env::var("DB_PATH") {
            Ok(path) if !path.is_empty() => Self { path: path.into() },
            _ => Self::default(),
        }
    }
}

/// Owns the database connection. Cloning is cheap; all clones share
/// one connection behind a mutex, so statements from concurrent
/// callers serialize. Multi-statement sequences are NOT transactional
/// across callers — uniqueness constraints are the backstop.
#[derive(Clone)]
pub struct DbManager {
    conn: Arc<Mutex<Connection>>,
}

impl DbManager {
    /// Open (or create) the database at the configured path.
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        info!(path = %config.path.display(), "opening SQLite database");
        let conn = Connection::open(&config.path).map_err(DbError::from)?;
        Self::init(conn)
    }

    /// An in-memory database, used by tests.
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(DbError::from)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        // WAL for concurrent reads + crash safety; foreign keys are
        // off by default in SQLite.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(DbError::from)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Check out the connection for a single statement. The guard
    /// returns it regardless of outcome.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}
