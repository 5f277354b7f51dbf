//! Chat protocol integration tests.
//!
//! Drives the WebSocket surface with a real client: authentication,
//! history replay, broadcast fan-out, and the anti-spoofing rule.

mod fixtures;
use fixtures::{TestServer, register};

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connect and send the credential frame. Authentication success is
/// silent, so the returned client is ready for the replay phase.
async fn connect_as(server: &TestServer, username: &str, password: &str) -> WsClient {
    let (mut ws, _response) = connect_async(server.ws_url())
        .await
        .expect("websocket connect failed");
    ws.send(Message::text(format!(
        r#"{{"username":"{username}","password":"{password}"}}"#
    )))
    .await
    .expect("failed to send credentials");
    ws
}

async fn next_text(ws: &mut WsClient) -> String {
    loop {
        let msg = ws
            .next()
            .await
            .expect("stream ended unexpectedly")
            .expect("websocket read failed");
        match msg {
            Message::Text(text) => return text.as_str().to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_first_message_is_broadcast_back_with_authenticated_username() {
    // テスト項目: 履歴なしで接続した場合、再生は 0 件で、送信した
    // メッセージが認証済みユーザー名付きで自分にも配送される
    // （クライアントが名乗った username は無視される）
    // given (前提条件):
    let server = TestServer::start().await;
    assert_eq!(register(&server, "bob", "pw1").await, 201);
    let mut bob = connect_as(&server, "bob", "pw1").await;

    // when (操作): 偽のユーザー名を名乗ってメッセージを送る
    bob.send(Message::text(r#"{"username":"mallory","text":"hi"}"#))
        .await
        .expect("failed to send chat frame");

    // then (期待する結果): 最初に届くフレームが認証済み識別子を持つ
    assert_eq!(
        next_text(&mut bob).await,
        r#"{"username":"bob","text":"hi"}"#
    );
}

#[tokio::test]
async fn test_bad_credentials_get_plaintext_rejection_then_close() {
    // テスト項目: 認証失敗時は平文の拒否通知が届き、接続が閉じられる
    // given (前提条件):
    let server = TestServer::start().await;
    assert_eq!(register(&server, "alice", "pw1").await, 201);

    // when (操作):
    let mut ws = connect_as(&server, "alice", "wrong").await;

    // then (期待する結果):
    assert_eq!(next_text(&mut ws).await, "Invalid username or password");
    match ws.next().await {
        None | Some(Ok(Message::Close(_))) | Some(Err(_)) => {}
        Some(Ok(other)) => panic!("expected close, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_user_gets_same_rejection() {
    // テスト項目: 未登録ユーザーでの接続も同じ拒否通知になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut ws = connect_as(&server, "nobody", "pw1").await;

    // then (期待する結果):
    assert_eq!(next_text(&mut ws).await, "Invalid username or password");
}

#[tokio::test]
async fn test_new_connection_replays_history_before_live_traffic() {
    // テスト項目: 新しい接続は保存済みメッセージを追記順で、ライブ配送
    // より先に受信する
    // given (前提条件): alice が 2 件送信し、配送完了（=永続化済み）を確認
    let server = TestServer::start().await;
    assert_eq!(register(&server, "alice", "pw1").await, 201);
    assert_eq!(register(&server, "bob", "pw2").await, 201);

    let mut alice = connect_as(&server, "alice", "pw1").await;
    alice
        .send(Message::text(r#"{"username":"alice","text":"m1"}"#))
        .await
        .expect("failed to send m1");
    alice
        .send(Message::text(r#"{"username":"alice","text":"m2"}"#))
        .await
        .expect("failed to send m2");
    assert_eq!(
        next_text(&mut alice).await,
        r#"{"username":"alice","text":"m1"}"#
    );
    assert_eq!(
        next_text(&mut alice).await,
        r#"{"username":"alice","text":"m2"}"#
    );

    // when (操作): bob が接続・認証する
    let mut bob = connect_as(&server, "bob", "pw2").await;

    // then (期待する結果): 履歴 2 件が順番どおり届き、その後のライブ
    // 配送が続く
    assert_eq!(
        next_text(&mut bob).await,
        r#"{"username":"alice","text":"m1"}"#
    );
    assert_eq!(
        next_text(&mut bob).await,
        r#"{"username":"alice","text":"m2"}"#
    );

    alice
        .send(Message::text(r#"{"username":"alice","text":"m3"}"#))
        .await
        .expect("failed to send m3");
    assert_eq!(
        next_text(&mut bob).await,
        r#"{"username":"alice","text":"m3"}"#
    );
}

#[tokio::test]
async fn test_broadcast_reaches_every_connected_client() {
    // テスト項目: ブロードキャストが送信者を含む全接続に届く
    // given (前提条件):
    let server = TestServer::start().await;
    assert_eq!(register(&server, "alice", "pw1").await, 201);
    assert_eq!(register(&server, "bob", "pw2").await, 201);
    let mut alice = connect_as(&server, "alice", "pw1").await;
    let mut bob = connect_as(&server, "bob", "pw2").await;

    // when (操作):
    alice
        .send(Message::text(r#"{"username":"alice","text":"hello"}"#))
        .await
        .expect("failed to send chat frame");

    // then (期待する結果):
    assert_eq!(
        next_text(&mut alice).await,
        r#"{"username":"alice","text":"hello"}"#
    );
    assert_eq!(
        next_text(&mut bob).await,
        r#"{"username":"alice","text":"hello"}"#
    );
}
