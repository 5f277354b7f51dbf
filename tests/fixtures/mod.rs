//! Test fixtures shared by the integration suites.
//!
//! Each suite compiles this module separately, so not every helper is
//! used by every binary.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use idobata::{
    domain::{HistoryStore, PasswordHasher, UserStore},
    infrastructure::{
        hasher::Sha256PasswordHasher,
        repository::{InMemoryHistoryStore, InMemoryUserStore},
    },
    relay::{ConnectionRegistry, Relay},
    ui::{AppState, build_router},
};

/// A full server instance on an ephemeral port, wired with in-memory
/// stores so every test starts from a clean slate.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let history: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Sha256PasswordHasher::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let relay = Relay::spawn(registry.clone(), history);

        let state = Arc::new(AppState {
            users,
            hasher,
            registry,
            relay,
        });
        let app = build_router(state, "public");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/websocket", self.addr)
    }
}

/// Register a user over the HTTP surface and return the response status.
pub async fn register(server: &TestServer, username: &str, password: &str) -> reqwest::StatusCode {
    let client = reqwest::Client::new();
    client
        .post(format!("{}/register", server.base_url()))
        .body(format!(
            r#"{{"username":"{username}","password":"{password}"}}"#
        ))
        .send()
        .await
        .expect("failed to send /register request")
        .status()
}
