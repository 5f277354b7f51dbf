//! In-memory store implementations, used by tests and as a zero-setup
//! fallback when no durable store is configured.

pub mod history;
pub mod user;

pub use history::InMemoryHistoryStore;
pub use user::InMemoryUserStore;
