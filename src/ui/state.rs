//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{PasswordHasher, UserStore},
    relay::{ConnectionRegistry, Relay},
};

/// Shared application state
///
/// Handlers build their usecases per request from the stores held here;
/// the relay handle and the registry are shared with every session.
pub struct AppState {
    /// ユーザーストア（データアクセス層の抽象化）
    pub users: Arc<dyn UserStore>,
    /// パスワード検証の能力
    pub hasher: Arc<dyn PasswordHasher>,
    /// Live connection registry, shared with the relay loop
    pub registry: Arc<ConnectionRegistry>,
    /// Handle to the broadcast relay loop
    pub relay: Relay,
}
