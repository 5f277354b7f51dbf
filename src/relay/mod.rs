//! Broadcast relay: the single serialization point of the chat core.
//!
//! Every cross-connection effect goes through one command queue drained by
//! exactly one loop task. The loop persists each published message and then
//! fans it out to the registry, so "persist then broadcast" pairs are
//! totally ordered by dequeue order. Join requests travel through the same
//! queue, which resolves the replay-vs-broadcast race: a message is either
//! persisted before the join (delivered once, via replay) or processed
//! after it (delivered once, via broadcast), never both and never neither.

pub mod registry;

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;

use crate::domain::{ChatMessage, HistoryStore, StoreError};

pub use registry::{ClientHandle, ConnectionId, ConnectionRegistry};

/// Capacity of the relay command queue.
///
/// The queue is bounded so a stalled relay exerts backpressure on the
/// submitting sessions instead of growing without bound; `submit` awaits
/// a free slot.
pub const RELAY_QUEUE_CAPACITY: usize = 256;

/// How many times a failed history append is attempted before the message
/// is dropped
const APPEND_ATTEMPTS: u32 = 3;

/// Backoff before the first append retry; doubled per attempt
const APPEND_BACKOFF_BASE: Duration = Duration::from_millis(100);

/// Commands accepted by the relay loop
enum RelayCommand {
    /// Persist a message, then fan it out to every registered connection
    Publish(ChatMessage),
    /// Replay history to one new connection, then register it
    Join {
        conn_id: ConnectionId,
        handle: ClientHandle,
    },
}

/// Cheap cloneable handle used by sessions to talk to the relay loop.
#[derive(Clone)]
pub struct Relay {
    tx: mpsc::Sender<RelayCommand>,
}

impl Relay {
    /// Spawn the relay loop task and return a handle to it.
    pub fn spawn(registry: Arc<ConnectionRegistry>, history: Arc<dyn HistoryStore>) -> Self {
        let (tx, rx) = mpsc::channel(RELAY_QUEUE_CAPACITY);
        tokio::spawn(run_loop(rx, registry, history));
        Self { tx }
    }

    /// Enqueue a message for persist-then-broadcast.
    ///
    /// The message's `username` must already carry the authenticated
    /// identity of the sender; the relay does not re-authenticate.
    /// Awaits queue capacity when the relay is backed up.
    pub async fn submit(&self, message: ChatMessage) {
        if self.tx.send(RelayCommand::Publish(message)).await.is_err() {
            tracing::error!("relay loop is gone; dropping message");
        }
    }

    /// Hand a freshly authenticated connection to the relay: its history
    /// replay and registry insertion are performed by the loop itself.
    pub async fn join(&self, conn_id: ConnectionId, handle: ClientHandle) {
        let cmd = RelayCommand::Join { conn_id, handle };
        if self.tx.send(cmd).await.is_err() {
            tracing::error!("relay loop is gone; dropping join for {}", conn_id);
        }
    }
}

async fn run_loop(
    mut rx: mpsc::Receiver<RelayCommand>,
    registry: Arc<ConnectionRegistry>,
    history: Arc<dyn HistoryStore>,
) {
    tracing::info!("relay loop started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            RelayCommand::Publish(message) => {
                handle_publish(message, &registry, history.as_ref()).await;
            }
            RelayCommand::Join { conn_id, handle } => {
                handle_join(conn_id, handle, &registry, history.as_ref()).await;
            }
        }
    }

    // All Relay handles dropped; nothing can be submitted anymore.
    tracing::info!("relay loop stopped");
}

/// Persist `message`, then fan it out.
///
/// A message that could not be persisted even after retries is dropped
/// entirely (not broadcast either), so what joiners replay and what live
/// connections receive never diverge.
async fn handle_publish(
    message: ChatMessage,
    registry: &ConnectionRegistry,
    history: &dyn HistoryStore,
) {
    if let Err(e) = append_with_retry(history, &message).await {
        tracing::error!("dropping message from '{}': {}", message.username, e);
        return;
    }

    let frame = serde_json::to_string(&message).unwrap();
    registry.broadcast(&frame).await;
}

/// Append with bounded retry.
///
/// A transient store outage must never terminate the shared loop; after
/// `APPEND_ATTEMPTS` failures the error is returned to the caller, which
/// drops the message and keeps serving.
async fn append_with_retry(
    history: &dyn HistoryStore,
    message: &ChatMessage,
) -> Result<(), StoreError> {
    let mut backoff = APPEND_BACKOFF_BASE;

    for attempt in 1..=APPEND_ATTEMPTS {
        match history.append(message).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < APPEND_ATTEMPTS => {
                tracing::warn!(
                    "history append failed (attempt {}/{}): {}; retrying in {:?}",
                    attempt,
                    APPEND_ATTEMPTS,
                    e,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("append_with_retry returns within the attempt loop")
}

/// Replay the full history into the joining connection's private channel,
/// then register it for broadcasts.
///
/// Replay frames go only to this one recipient; they never pass through
/// `broadcast`. If the connection dies mid-replay it is simply never
/// registered.
async fn handle_join(
    conn_id: ConnectionId,
    handle: ClientHandle,
    registry: &ConnectionRegistry,
    history: &dyn HistoryStore,
) {
    match history.read_all().await {
        Ok(messages) => {
            for message in &messages {
                let frame = serde_json::to_string(message).unwrap();
                if handle.sender.send(frame).is_err() {
                    tracing::warn!("connection {} closed during history replay", conn_id);
                    return;
                }
            }
            if !messages.is_empty() {
                tracing::debug!("replayed {} messages to {}", messages.len(), conn_id);
            }
        }
        Err(e) => {
            // Degraded join: the connection still gets live traffic.
            tracing::error!("history replay for {} failed: {}", conn_id, e);
        }
    }

    let username = handle.username.clone();
    registry.register(conn_id, handle).await;
    tracing::info!("connection {} ('{}') registered", conn_id, username);
}
