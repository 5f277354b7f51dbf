//! Runtime configuration, read once at startup.

use clap::Parser;

/// Configuration for the chat relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "idobata-server", about = "Realtime chat relay server")]
pub struct ServerConfig {
    /// Listening port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path to the SQLite database file (use ":memory:" for an ephemeral store)
    #[arg(long, env = "DATABASE_PATH", default_value = "idobata.db")]
    pub database_path: String,

    /// Directory of static assets served under /
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: String,
}
