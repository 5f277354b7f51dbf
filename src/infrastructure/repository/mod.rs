//! Repository パターンの実装
//!
//! ドメイン層が定義する store trait の具体的な実装を提供します。
//! UseCase 層と relay は trait（ドメイン層）に依存し、この実装に直接
//! 依存しません（依存性の逆転）。

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{InMemoryHistoryStore, InMemoryUserStore};
pub use sqlite::{Database, SqliteHistoryStore, SqliteUserStore};
