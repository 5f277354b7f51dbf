//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageText, Username};

/// A single chat message.
///
/// Immutable once created. The serialized JSON form (`{"username", "text"}`)
/// is both the unit of persistence and the unit of wire transmission; there
/// is no message id, timestamp, or sequence number; ordering is implicit in
/// store/broadcast order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Authenticated identity of the sender
    pub username: Username,
    /// Message body
    pub text: MessageText,
}

impl ChatMessage {
    /// Create a new ChatMessage from the authenticated sender and body
    pub fn new(username: Username, text: MessageText) -> Self {
        Self { username, text }
    }
}

/// A registered user as held by the user store.
///
/// `password_hash` is an opaque verifier string produced by the
/// [`PasswordHasher`](super::store::PasswordHasher) capability; the domain
/// never interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username, used as the store key
    pub username: Username,
    /// One-way password verifier
    pub password_hash: String,
}

impl UserRecord {
    /// Create a new UserRecord
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_wire_format() {
        // テスト項目: ChatMessage が {username, text} 形式でシリアライズされる
        // given (前提条件):
        let msg = ChatMessage::new(
            Username::new("alice".to_string()).unwrap(),
            MessageText::new("hi".to_string()).unwrap(),
        );

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"username":"alice","text":"hi"}"#);
    }

    #[test]
    fn test_chat_message_deserialize() {
        // テスト項目: 永続化された JSON から ChatMessage を復元できる
        // given (前提条件):
        let json = r#"{"username":"bob","text":"hello"}"#;

        // when (操作):
        let msg: ChatMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg.username.as_str(), "bob");
        assert_eq!(msg.text.as_str(), "hello");
    }
}
