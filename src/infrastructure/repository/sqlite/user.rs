//! SQLite UserStore 実装
//!
//! ユーザーごとに 1 レコードを username をキーに保存します。値は
//! UserRecord の JSON 表現です。一意性はプライマリキー制約で保証します。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::domain::{StoreError, UserRecord, UserStore, Username};

use super::{lock_conn, sqlite_unavailable};

/// SQLite UserStore 実装
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub(crate) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let body = serde_json::to_string(&record)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let conn = lock_conn(&self.conn)?;
        let result = conn.execute(
            "INSERT INTO users (username, body) VALUES (?1, ?2)",
            params![record.username.as_str(), body],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(
                    record.username.as_str().to_string(),
                ))
            }
            Err(e) => Err(sqlite_unavailable(e)),
        }
    }

    async fn find(&self, username: &Username) -> Result<Option<UserRecord>, StoreError> {
        let conn = lock_conn(&self.conn)?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM users WHERE username = ?1",
                params![username.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(sqlite_unavailable)?;

        match body {
            Some(body) => {
                let record = serde_json::from_str(&body)
                    .map_err(|e| StoreError::Corrupt(format!("bad user row: {e}")))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
