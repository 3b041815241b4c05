//! Database-specific error types and conversions.

use renta_core::error::RentaError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("duplicate value for {field}")]
    Duplicate { field: String },

    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, Some(msg)) = &err {
            // "UNIQUE constraint failed: usuarios.username" — the
            // storage constraint is the authoritative duplicate guard.
            if code.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.starts_with("UNIQUE constraint failed")
            {
                let field = msg
                    .rsplit(' ')
                    .next()
                    .unwrap_or("value")
                    .to_string();
                return DbError::Duplicate { field };
            }
        }
        DbError::Sqlite(err)
    }
}

impl From<DbError> for RentaError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate { field } => RentaError::Duplicate { field },
            other => RentaError::Database(other.to_string()),
        }
    }
}

/// Shorthand for repository code: rusqlite error → core error.
pub(crate) fn db_err(err: rusqlite::Error) -> RentaError {
    DbError::from(err).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_duplicate() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err();
        match DbError::from(err) {
            DbError::Duplicate { field } => assert_eq!(field, "t.x"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn other_errors_pass_through() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("INSERT INTO missing VALUES (1)", []).unwrap_err();
        assert!(matches!(DbError::from(err), DbError::Sqlite(_)));
    }
}
