use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use codepad_shared::SyncMessage;

use super::{SendError, Transport, TransportEvent};
use crate::error::TransportError;

/// Transport over one tokio-tungstenite WebSocket connection.
///
/// The reader and writer halves run as background tasks; inbound events
/// funnel through a single ordered queue, so the session processes them one
/// at a time in arrival order. Malformed frames are logged and dropped,
/// never surfaced as errors.
pub struct WebSocketTransport {
    outgoing: UnboundedSender<SyncMessage>,
    events: UnboundedReceiver<TransportEvent>,
}

impl WebSocketTransport {
    /// Connect to `url`, e.g. `ws://127.0.0.1:8000/ws/r1/c1`.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (stream, _response) =
            connect_async(url)
                .await
                .map_err(|err| TransportError::ConnectFailed {
                    url: url.to_string(),
                    detail: err.to_string(),
                })?;
        let (mut sink, mut source) = stream.split();

        let (event_tx, events) = mpsc::unbounded_channel();
        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<SyncMessage>();

        // The handshake finished, so the connection is open.
        let _ = event_tx.send(TransportEvent::Opened);

        tokio::spawn(async move {
            while let Some(message) = outgoing_rx.recv().await {
                let frame = match message.encode() {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!("{err}");
                        continue;
                    }
                };
                if let Err(err) = sink.send(WsMessage::Text(frame)).await {
                    warn!("outbound send failed: {err}");
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => match SyncMessage::decode(&text) {
                        Ok(message) => {
                            if event_tx.send(TransportEvent::Message(message)).is_err() {
                                return;
                            }
                        }
                        Err(err) => warn!("{err}"),
                    },
                    Ok(WsMessage::Close(_)) => break,
                    Ok(_) => debug!("ignoring non-text frame"),
                    Err(err) => {
                        let _ = event_tx.send(TransportEvent::Failed(TransportError::Fault {
                            detail: err.to_string(),
                        }));
                        return;
                    }
                }
            }
            // Close frame or abrupt end of stream: either way, closed.
            let _ = event_tx.send(TransportEvent::Closed);
        });

        Ok(Self { outgoing, events })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    fn send(&mut self, message: SyncMessage) -> Result<(), SendError> {
        self.outgoing.send(message).map_err(|_| SendError)
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }
}
