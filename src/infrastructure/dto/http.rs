//! HTTP request DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Request body for `POST /register` and `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsDto {
    pub username: String,
    pub password: String,
}
