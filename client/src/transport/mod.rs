//! Transport seam between the synchronization client and the realtime
//! connection.
//!
//! The production transport is [`WebSocketTransport`]; tests drive a
//! [`Session`](crate::Session) through channel-backed fakes instead.

mod websocket;

pub use websocket::WebSocketTransport;

use async_trait::async_trait;
use codepad_shared::SyncMessage;

use crate::error::TransportError;

/// Failed to hand a message to the transport.
#[derive(Debug)]
pub struct SendError;

/// Connection-level happenings, delivered one at a time in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection finished opening.
    Opened,
    /// A decoded inbound message.
    Message(SyncMessage),
    /// The connection closed.
    Closed,
    /// The transport faulted; terminal.
    Failed(TransportError),
}

/// One bidirectional message connection scoped to a room identity.
#[async_trait]
pub trait Transport: Send {
    /// Queue an outbound message for delivery.
    fn send(&mut self, message: SyncMessage) -> Result<(), SendError>;

    /// Await the next connection event. `None` once the connection has
    /// terminated and every event has been drained.
    async fn next_event(&mut self) -> Option<TransportEvent>;
}
