//! Store traits owned by the domain layer.
//!
//! The UseCase layer and the relay depend on these traits only; concrete
//! implementations live in the infrastructure layer (dependency inversion).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::{ChatMessage, UserRecord};
use super::error::StoreError;
use super::value_object::Username;

/// Durable append-only log of chat messages.
///
/// Messages are read back in their exact append order; there is no
/// pagination and no eviction. `read_all` is called once per new
/// connection for history replay.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist `message` at the end of the log
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError>;

    /// Return every message ever appended, in append order
    async fn read_all(&self) -> Result<Vec<ChatMessage>, StoreError>;
}

/// Store of registered users, keyed by username.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the username is taken.
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Look up a record by username; `Ok(None)` if the user is unknown
    async fn find(&self, username: &Username) -> Result<Option<UserRecord>, StoreError>;
}

/// Opaque one-way password hashing capability.
///
/// The domain treats the stored verifier as an opaque string: only the
/// hasher that produced it can check a plaintext against it.
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a stored verifier from a plaintext password
    fn hash(&self, plain: &str) -> String;

    /// Check a plaintext password against a stored verifier
    fn verify(&self, plain: &str, stored: &str) -> bool;
}
