//! Local registration store.
//!
//! A single SQLite file with one append-only table. Every operation opens
//! its own connection and closes it before returning; nothing is pooled.

mod registrations;
mod schema;

pub use schema::*;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, ErrorCode};
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid stored value in column {column}: {value:?}")]
    InvalidValue { column: &'static str, value: String },

    #[error("Storage directory error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => DbError::Constraint(e.to_string()),
            _ => DbError::Sqlite(e),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the registration store file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the store at path, creating the file and schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the table if it does not exist. Idempotent.
    pub fn ensure_schema(&self) -> DbResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %self.path.display(), "schema ensured");
        Ok(())
    }

    fn connect(&self) -> DbResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}
