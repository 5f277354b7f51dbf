//! Live connection registry.
//!
//! The registry is mutated from several concurrent paths at once: sessions
//! insert themselves on activation and remove themselves on close, while the
//! relay loop removes connections whose channel turned out to be dead during
//! fan-out. Every operation therefore goes through a single async mutex;
//! the raw map is never exposed.

use std::{collections::HashMap, fmt};

use tokio::sync::{Mutex, mpsc::UnboundedSender};
use uuid::Uuid;

use crate::domain::Username;

/// Opaque identifier of one live connection.
///
/// Connections are keyed by id rather than by username, so one user may
/// hold several live connections at once (e.g. two browser tabs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The write half of one registered connection.
///
/// The session owns the socket; the registry only holds the sender side of
/// the session's private channel. A failed `send` means the session is gone
/// and the connection is treated as unwritable.
pub struct ClientHandle {
    /// Authenticated identity of the connection
    pub username: Username,
    /// Channel draining into the connection's socket
    pub sender: UnboundedSender<String>,
}

/// The set of currently live, authenticated connections.
///
/// A connection is present here if and only if its session is between
/// successful authentication and termination. Registry state is purely
/// in-memory; it is lost on restart and reconnecting is the client's
/// responsibility.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ClientHandle>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Add a connection as live. No-op if the id is already registered.
    pub async fn register(&self, conn_id: ConnectionId, handle: ClientHandle) {
        let mut connections = self.connections.lock().await;
        connections.entry(conn_id).or_insert(handle);
    }

    /// Remove a connection. Idempotent: removing an absent id is not an
    /// error, since the session close path and the relay's write-failure
    /// path may both try to remove the same connection.
    pub async fn unregister(&self, conn_id: ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(&conn_id);
    }

    /// Deliver one serialized frame to every registered connection, in
    /// unspecified order.
    ///
    /// A connection whose channel is closed is removed from the registry;
    /// delivery to everyone else continues and the failure is never
    /// surfaced to the sender.
    pub async fn broadcast(&self, frame: &str) {
        let mut connections = self.connections.lock().await;

        let mut dead = Vec::new();
        for (conn_id, handle) in connections.iter() {
            if handle.sender.send(frame.to_string()).is_err() {
                dead.push(*conn_id);
            }
        }

        for conn_id in dead {
            tracing::warn!("connection {} is unwritable, removing from registry", conn_id);
            connections.remove(&conn_id);
        }
    }

    /// Number of currently registered connections
    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Whether the given connection is currently registered
    pub async fn contains(&self, conn_id: ConnectionId) -> bool {
        self.connections.lock().await.contains_key(&conn_id)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
