//! SQLite-backed store implementations.
//!
//! One database file holds both the append-only message log and the user
//! records. The [`Database`] handle owns the connection; the two store
//! types share it behind a mutex. All statements are short and synchronous,
//! so the mutex is never held across an await point.

pub mod history;
pub mod user;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::domain::StoreError;

pub use history::SqliteHistoryStore;
pub use user::SqliteUserStore;

/// Shared SQLite connection with the chat relay schema applied.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("failed to open database at {path}: {e}")))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(sqlite_unavailable)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS chat_messages (
                id   INTEGER PRIMARY KEY AUTOINCREMENT,
                body TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                body     TEXT NOT NULL
            );
            ",
        )
        .map_err(sqlite_unavailable)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// History store view over this database
    pub fn history_store(&self) -> SqliteHistoryStore {
        SqliteHistoryStore::new(Arc::clone(&self.conn))
    }

    /// User store view over this database
    pub fn user_store(&self) -> SqliteUserStore {
        SqliteUserStore::new(Arc::clone(&self.conn))
    }
}

/// Lock the shared connection, surfacing poisoning as a store outage.
pub(crate) fn lock_conn(
    conn: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, StoreError> {
    conn.lock()
        .map_err(|_| StoreError::Unavailable("database mutex poisoned".to_string()))
}

/// Map an arbitrary SQLite error to a store outage
pub(crate) fn sqlite_unavailable(e: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}
