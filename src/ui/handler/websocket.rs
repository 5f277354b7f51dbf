//! WebSocket connection handlers.
//!
//! One session per connection, running the state machine
//! `Connecting → Authenticating → Active → Closed`. An active session is a
//! pair of tasks: the read loop forwards inbound messages to the relay, the
//! send task drains the session's private channel into the socket. Either
//! task ending tears the session down.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, MessageText, Username},
    infrastructure::dto::websocket::{ChatFrame, CredentialsFrame},
    relay::{ClientHandle, ConnectionId},
    ui::state::AppState,
    usecase::{AuthError, AuthenticateUserUseCase},
};

/// Plaintext frame sent before closing a connection that failed to
/// authenticate. The only non-JSON frame the server ever writes.
const AUTH_REJECTION: &str = "Invalid username or password";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Authenticating: the first frame must be the credential object.
    let credentials = match read_credentials(&mut receiver).await {
        Some(credentials) => credentials,
        None => return, // protocol failure: abandon without reaching Active
    };

    let username = match Username::try_from(credentials.username) {
        Ok(username) => username,
        Err(_) => {
            reject(&mut sender).await;
            return;
        }
    };

    let auth = AuthenticateUserUseCase::new(state.users.clone(), state.hasher.clone());
    if let Err(e) = auth.execute(&username, &credentials.password).await {
        match e {
            AuthError::InvalidCredentials => {
                tracing::info!("rejected connection for '{}'", username);
            }
            AuthError::Store(e) => {
                tracing::error!("user store failure during session auth: {}", e);
            }
        }
        reject(&mut sender).await;
        return;
    }

    // Active: hand the connection to the relay. History replay and registry
    // insertion happen inside the relay loop, so replayed frames arrive on
    // `rx` strictly before any broadcast that follows the join.
    let conn_id = ConnectionId::generate();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = ClientHandle {
        username: username.clone(),
        sender: tx,
    };
    state.relay.join(conn_id, handle).await;
    tracing::info!("connection {} authenticated as '{}'", conn_id, username);

    // Read loop: forward each inbound message to the relay.
    let relay = state.relay.clone();
    let sender_identity = username.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!("websocket read error for '{}': {}", sender_identity, e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    // An undecodable frame is a protocol violation and
                    // drops the connection.
                    let chat = match serde_json::from_str::<ChatFrame>(&text) {
                        Ok(chat) => chat,
                        Err(e) => {
                            tracing::warn!(
                                "undecodable frame from '{}': {}",
                                sender_identity,
                                e
                            );
                            break;
                        }
                    };

                    let text = match MessageText::try_from(chat.text) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!(
                                "invalid message from '{}': {}",
                                sender_identity,
                                e
                            );
                            continue;
                        }
                    };

                    // The client-supplied username is overwritten with the
                    // identity established at authentication (anti-spoofing).
                    let message = ChatMessage::new(sender_identity.clone(), text);
                    relay.submit(message).await;
                }
                Message::Close(_) => {
                    tracing::info!("'{}' requested close", sender_identity);
                    break;
                }
                // Ping/pong is handled by the protocol layer.
                _ => {}
            }
        }
    });

    // Send task: drain replayed and broadcast frames into the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Closed. The relay's fan-out may already have removed this connection
    // after a write failure; unregister is idempotent, so both teardown
    // paths agree.
    state.registry.unregister(conn_id).await;
    tracing::info!("connection {} ('{}') closed", conn_id, username);
}

/// Read the credential frame that opens every session.
///
/// Returns `None` on close, read error, or an undecodable frame; the
/// attempt is then abandoned without a rejection notice, matching the
/// handshake-failure path.
async fn read_credentials(receiver: &mut SplitStream<WebSocket>) -> Option<CredentialsFrame> {
    match receiver.next().await {
        Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::warn!("undecodable credential frame: {}", e);
                None
            }
        },
        _ => None,
    }
}

/// Send the plaintext auth rejection; the connection closes right after,
/// so a failed write only gets a debug log.
async fn reject(sender: &mut SplitSink<WebSocket, Message>) {
    if sender
        .send(Message::Text(AUTH_REJECTION.into()))
        .await
        .is_err()
    {
        tracing::debug!("failed to deliver auth rejection");
    }
}
