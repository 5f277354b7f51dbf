//! InMemory UserStore 実装
//!
//! HashMap をインメモリ DB として使用する実装。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StoreError, UserRecord, UserStore, Username};

/// インメモリ UserStore 実装
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    /// 空の InMemoryUserStore を作成
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.lock().await;
        let key = record.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        users.insert(key, record);
        Ok(())
    }

    async fn find(&self, username: &Username) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().await;
        Ok(users.get(username.as_str()).cloned())
    }
}
