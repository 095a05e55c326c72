use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use codepad_shared::{RoomIdentity, SyncMessage};
use log::{debug, info, warn};

use crate::document::Document;
use crate::error::TransportError;
use crate::events::ClientEvent;

/// Connection lifecycle as surfaced to the user.
///
/// Transitions: `Connecting → Open` on open, `Open → Closed` on close, any
/// live state `→ Errored` on a transport fault. `Closed` and `Errored` are
/// terminal; there is no automatic reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionStatus::Open)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionStatus::Closed | ConnectionStatus::Errored)
    }
}

/// Shared flag that is true exactly while an inbound apply is being
/// reflected into the editor surface.
#[derive(Debug, Clone, Default)]
struct EchoGuard {
    flag: Arc<AtomicBool>,
}

impl EchoGuard {
    fn engage(&self) -> EchoGuardHandle {
        self.flag.store(true, Ordering::Release);
        EchoGuardHandle {
            flag: self.flag.clone(),
        }
    }

    fn is_engaged(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Clears the echo guard when dropped.
#[derive(Debug)]
struct EchoGuardHandle {
    flag: Arc<AtomicBool>,
}

impl Drop for EchoGuardHandle {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A remote document replacement awaiting reflection into the editor
/// surface.
///
/// The echo guard stays engaged until this is dropped, so change
/// notifications fired by the reflection itself are not re-detected as
/// local edits and re-broadcast. Drop it as soon as the editor shows the
/// new content.
#[derive(Debug)]
pub struct RemoteApply {
    content: String,
    _guard: EchoGuardHandle,
}

impl RemoteApply {
    /// The full document text to reflect into the editor.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The document synchronization state machine.
///
/// Owns the authoritative [`Document`], the connection status, the echo
/// guard, and the outbound queue. All I/O lives elsewhere: the embedder
/// feeds editor changes into [`SyncClient::on_local_change`] and connection
/// events into the `on_*` handlers, and drains [`SyncClient::take_outgoing`]
/// into the transport.
pub struct SyncClient {
    identity: RoomIdentity,
    document: Document,
    status: ConnectionStatus,
    echo_guard: EchoGuard,
    outgoing: VecDeque<SyncMessage>,
    events: VecDeque<ClientEvent>,
}

impl SyncClient {
    pub fn new(identity: RoomIdentity) -> Self {
        Self {
            identity,
            document: Document::new(),
            status: ConnectionStatus::Connecting,
            echo_guard: EchoGuard::default(),
            outgoing: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    pub fn identity(&self) -> &RoomIdentity {
        &self.identity
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn document(&self) -> &str {
        self.document.content()
    }

    // Editor-driven input

    /// Notify the client that the editor's content changed, for any reason.
    ///
    /// Reflections of a remote apply (echo guard engaged) and no-op changes
    /// are ignored. A genuine edit replaces the document and, while the
    /// connection is open, queues exactly one whole-document update for the
    /// room. Edits made while not open are kept locally but never
    /// transmitted; delivery is at-most-once with no retry queue.
    pub fn on_local_change(&mut self, new_content: &str) {
        if self.echo_guard.is_engaged() {
            debug!("ignoring editor change during remote apply");
            return;
        }
        if !self.document.replace(new_content) {
            return;
        }
        if self.status.is_open() {
            self.outgoing.push_back(SyncMessage::Update {
                content: new_content.to_string(),
            });
        } else {
            debug!("edit while {:?}; not transmitted", self.status);
        }
    }

    // Transport-driven input

    /// Apply one inbound message. Messages must be fed strictly in receipt
    /// order; there is no reordering buffer.
    ///
    /// `init` and `update` replace the document if and only if the content
    /// differs (idempotence spares the editor a redundant cursor reset).
    /// Returns the replacement for the embedder to reflect into the editor
    /// surface; every other message kind is a no-op.
    pub fn on_remote_message(&mut self, message: SyncMessage) -> Option<RemoteApply> {
        match message {
            SyncMessage::Init { content } | SyncMessage::Update { content } => {
                if self.document.matches(&content) {
                    return None;
                }
                let guard = self.echo_guard.engage();
                self.document.replace(&content);
                Some(RemoteApply {
                    content,
                    _guard: guard,
                })
            }
            SyncMessage::UserLeft { client_id } => {
                info!(
                    "client '{}' left room '{}'",
                    client_id,
                    self.identity.room_id()
                );
                None
            }
            SyncMessage::Unknown => {
                debug!("ignoring message with unrecognized type");
                None
            }
        }
    }

    // Connection lifecycle

    pub fn on_open(&mut self) {
        match self.status {
            ConnectionStatus::Connecting => self.transition(ConnectionStatus::Open),
            other => warn!("spurious open event while {:?}", other),
        }
    }

    pub fn on_close(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.transition(ConnectionStatus::Closed);
    }

    pub fn on_transport_error(&mut self, error: TransportError) {
        warn!("{error}");
        if self.status != ConnectionStatus::Errored {
            self.transition(ConnectionStatus::Errored);
        }
        self.events.push_back(ClientEvent::TransportFailed(error));
    }

    fn transition(&mut self, next: ConnectionStatus) {
        self.status = next;
        self.events.push_back(ClientEvent::StatusChanged(next));
    }

    // Output queues

    /// Next message to hand to the transport, in send order.
    pub fn take_outgoing(&mut self) -> Option<SyncMessage> {
        self.outgoing.pop_front()
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    /// Next UI-facing event, in occurrence order.
    pub fn take_event(&mut self) -> Option<ClientEvent> {
        self.events.pop_front()
    }
}
