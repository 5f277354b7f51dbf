//! Realtime chat relay server library.
//!
//! Clients connect over WebSocket, authenticate, receive the full message
//! history, and then exchange broadcast messages relayed through a central
//! hub backed by a durable append-only message log.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod relay;
pub mod server;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use server::{ServerError, run_server};
