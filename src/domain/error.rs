//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors raised by the history and user stores.
///
/// `Unavailable` is the recoverable form of a persistence outage: callers
/// retry or degrade, they never terminate the process over it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying store cannot be reached or rejected the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record with the same key already exists
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// A stored value could not be (de)serialized
    #[error("stored value is corrupt: {0}")]
    Corrupt(String),
}
