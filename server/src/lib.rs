//! # Codepad Server
//! WebSocket room relay: accepts one connection per (room, client) pair,
//! hands a freshly joined client the room's current document, and fans
//! every member's update out to all other members.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod room;

pub use room::{MemberKey, RoomRegistry};

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::sync::mpsc;

/// Build the relay application with a fresh registry.
pub fn app() -> Router {
    app_with_registry(Arc::new(RoomRegistry::new()))
}

/// Build the relay application over a shared registry.
pub fn app_with_registry(registry: Arc<RoomRegistry>) -> Router {
    Router::new()
        .route("/ws/:room_id/:client_id", get(ws_handler))
        .with_state(registry)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room_id, client_id)): Path<(String, String)>,
    State(registry): State<Arc<RoomRegistry>>,
) -> impl IntoResponse {
    info!("connection attempt: room='{}' client='{}'", room_id, client_id);
    ws.on_upgrade(move |socket| serve_member(socket, registry, room_id, client_id))
}

async fn serve_member(
    socket: WebSocket,
    registry: Arc<RoomRegistry>,
    room_id: String,
    client_id: String,
) {
    let (mut sink, mut source) = socket.split();
    let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    let key = registry.join(&room_id, &client_id, outbound).await;

    // Writer half: everything addressed to this member, init snapshot first.
    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => registry.relay(&room_id, key, &text).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => debug!("ignoring non-text frame from '{}'", client_id),
            Err(err) => {
                debug!("receive error from '{}': {}", client_id, err);
                break;
            }
        }
    }

    // Removing the member drops its outbound sender, ending the writer.
    registry.leave(&room_id, key).await;
    let _ = writer.await;
}
