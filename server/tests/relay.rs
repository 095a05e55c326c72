//! Wire-level tests against a live relay on an ephemeral port.

use std::time::Duration;

use codepad_shared::SyncMessage;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_relay() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let authority = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, codepad_server::app()).await.unwrap();
    });
    authority
}

async fn join(authority: &str, room: &str, client: &str) -> WsStream {
    let url = format!("ws://{authority}/ws/{room}/{client}");
    let (stream, _response) = connect_async(url).await.unwrap();
    stream
}

async fn recv_message(ws: &mut WsStream) -> SyncMessage {
    loop {
        let frame = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("frame within deadline")
            .expect("stream still open")
            .expect("no transport error");
        if let Message::Text(text) = frame {
            return SyncMessage::decode(&text).expect("well-formed frame");
        }
    }
}

async fn send_update(ws: &mut WsStream, content: &str) {
    let frame = SyncMessage::Update {
        content: content.to_string(),
    }
    .encode()
    .unwrap();
    ws.send(Message::Text(frame)).await.unwrap();
}

fn init(content: &str) -> SyncMessage {
    SyncMessage::Init {
        content: content.to_string(),
    }
}

fn update(content: &str) -> SyncMessage {
    SyncMessage::Update {
        content: content.to_string(),
    }
}

#[tokio::test]
async fn joiners_get_snapshots_and_updates_fan_out() {
    let authority = spawn_relay().await;

    let mut alice = join(&authority, "r1", "alice").await;
    assert_eq!(recv_message(&mut alice).await, init(""));

    let mut bob = join(&authority, "r1", "bob").await;
    assert_eq!(recv_message(&mut bob).await, init(""));

    send_update(&mut alice, "print(2)").await;
    assert_eq!(recv_message(&mut bob).await, update("print(2)"));

    // The sender never hears its own broadcast.
    assert!(
        timeout(Duration::from_millis(300), alice.next()).await.is_err(),
        "sender received an echo"
    );

    // A late joiner converges from the retained snapshot.
    let mut cara = join(&authority, "r1", "cara").await;
    assert_eq!(recv_message(&mut cara).await, init("print(2)"));
}

#[tokio::test]
async fn departures_are_announced() {
    let authority = spawn_relay().await;

    let mut alice = join(&authority, "r2", "alice").await;
    assert_eq!(recv_message(&mut alice).await, init(""));
    let mut bob = join(&authority, "r2", "bob").await;
    assert_eq!(recv_message(&mut bob).await, init(""));

    bob.close(None).await.unwrap();
    assert_eq!(
        recv_message(&mut alice).await,
        SyncMessage::UserLeft {
            client_id: "bob".to_string()
        }
    );
}

#[tokio::test]
async fn rooms_are_isolated() {
    let authority = spawn_relay().await;

    let mut alice = join(&authority, "room-a", "alice").await;
    assert_eq!(recv_message(&mut alice).await, init(""));
    let mut bob = join(&authority, "room-b", "bob").await;
    assert_eq!(recv_message(&mut bob).await, init(""));

    send_update(&mut alice, "only for room a").await;
    assert!(
        timeout(Duration::from_millis(300), bob.next()).await.is_err(),
        "update leaked across rooms"
    );
}

#[tokio::test]
async fn malformed_frames_are_dropped_not_fatal() {
    let authority = spawn_relay().await;

    let mut alice = join(&authority, "r3", "alice").await;
    assert_eq!(recv_message(&mut alice).await, init(""));
    let mut bob = join(&authority, "r3", "bob").await;
    assert_eq!(recv_message(&mut bob).await, init(""));

    alice
        .send(Message::Text("this is not json".to_string()))
        .await
        .unwrap();

    // The connection survives and later traffic still relays.
    send_update(&mut alice, "still alive").await;
    assert_eq!(recv_message(&mut bob).await, update("still alive"));
}

#[tokio::test]
async fn unknown_types_are_relayed_verbatim() {
    let authority = spawn_relay().await;

    let mut alice = join(&authority, "r4", "alice").await;
    assert_eq!(recv_message(&mut alice).await, init(""));
    let mut bob = join(&authority, "r4", "bob").await;
    assert_eq!(recv_message(&mut bob).await, init(""));

    // Forward-compatible: the relay passes fields it does not understand.
    let frame = r#"{"type":"cursor_moved","line":3}"#;
    alice.send(Message::Text(frame.to_string())).await.unwrap();

    let received = timeout(Duration::from_secs(5), bob.next())
        .await
        .expect("frame within deadline")
        .unwrap()
        .unwrap();
    assert_eq!(received, Message::Text(frame.to_string()));
}
