//! WebSocket frame DTOs for the chat protocol.

use serde::{Deserialize, Serialize};

/// First frame of every connection: the credential object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsFrame {
    pub username: String,
    pub password: String,
}

/// Inbound chat frame.
///
/// The `username` field is accepted for wire compatibility but ignored by
/// the session, which stamps the authenticated identity instead.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatFrame {
    #[serde(default)]
    pub username: String,
    pub text: String,
}
