//! InMemory HistoryStore 実装
//!
//! Vec をインメモリの追記専用ログとして使用する実装。
//! プロセス終了でメッセージは失われるため、本番では SQLite 実装を
//! 使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryStore, StoreError};

/// インメモリ HistoryStore 実装
pub struct InMemoryHistoryStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryHistoryStore {
    /// 空の InMemoryHistoryStore を作成
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, Username};

    fn msg(username: &str, text: &str) -> ChatMessage {
        ChatMessage::new(
            Username::new(username.to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_read_all_empty() {
        // テスト項目: 空のストアからは空のリストが返る
        // given (前提条件):
        let store = InMemoryHistoryStore::new();

        // when (操作):
        let messages = store.read_all().await.unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        // テスト項目: メッセージが追記順で読み出される
        // given (前提条件):
        let store = InMemoryHistoryStore::new();

        // when (操作):
        store.append(&msg("alice", "first")).await.unwrap();
        store.append(&msg("bob", "second")).await.unwrap();
        store.append(&msg("alice", "third")).await.unwrap();

        // then (期待する結果):
        let messages = store.read_all().await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text.as_str(), "first");
        assert_eq!(messages[1].text.as_str(), "second");
        assert_eq!(messages[2].text.as_str(), "third");
    }
}
