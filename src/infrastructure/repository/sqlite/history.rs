//! SQLite HistoryStore 実装
//!
//! メッセージは JSON 文字列のまま追記専用テーブルに保存し、`id` の昇順で
//! 読み出すことで追記順を保証します。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, params};

use crate::domain::{ChatMessage, HistoryStore, StoreError};

use super::{lock_conn, sqlite_unavailable};

/// SQLite HistoryStore 実装
pub struct SqliteHistoryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteHistoryStore {
    pub(crate) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let body = serde_json::to_string(message)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT INTO chat_messages (body) VALUES (?1)",
            params![body],
        )
        .map_err(sqlite_unavailable)?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ChatMessage>, StoreError> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT body FROM chat_messages ORDER BY id")
            .map_err(sqlite_unavailable)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(sqlite_unavailable)?;

        let mut messages = Vec::new();
        for body in rows {
            let body = body.map_err(sqlite_unavailable)?;
            let message = serde_json::from_str(&body)
                .map_err(|e| StoreError::Corrupt(format!("bad message row: {e}")))?;
            messages.push(message);
        }
        Ok(messages)
    }
}
