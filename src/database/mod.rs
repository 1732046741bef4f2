use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by the storage layer.
///
/// "Not found" is never an error here; absent rows are reported as
/// `Option::None` / `false` by the query methods themselves.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database lock poisoned")]
    Lock,

    #[error("blocking task failed: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}

/// Shared handle to the embedded SQLite database.
///
/// Opened once at process start and cloned wherever storage access is
/// needed. The connection mutex serializes statements; there is no
/// additional locking above it.
#[derive(Clone)]
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and run schema setup.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.create_docs_table()?;
        Ok(db)
    }

    /// Open a private in-memory database. Used by tests that want real
    /// SQL semantics without touching disk.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.create_docs_table()?;
        Ok(db)
    }
}
