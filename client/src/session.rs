use codepad_shared::{LanguageId, LanguageProfile, RoomIdentity, UnknownLanguageError};
use log::warn;

use crate::client::{ConnectionStatus, RemoteApply, SyncClient};
use crate::error::TransportError;
use crate::events::ClientEvent;
use crate::switcher::{LanguageSwitch, LanguageSwitcher};
use crate::transport::{Transport, TransportEvent, WebSocketTransport};

/// Session-level configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Authority of the relay server, e.g. `127.0.0.1:8000`.
    pub server_authority: String,
    /// Connect with `wss://` instead of `ws://`.
    pub secure: bool,
    /// Profile active at startup.
    pub initial_language: LanguageId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_authority: "127.0.0.1:8000".to_string(),
            secure: false,
            initial_language: LanguageId::Python,
        }
    }
}

/// What the embedder reacts to after one processed connection event.
#[derive(Debug)]
pub enum SessionEvent {
    /// The status indicator should change.
    StatusChanged(ConnectionStatus),
    /// A transport fault to surface as a log line.
    TransportFailed(TransportError),
    /// Remote content to reflect into the editor surface. Hold the apply
    /// while reflecting: the echo guard stays engaged until it drops.
    DocumentReplaced(RemoteApply),
}

/// Owns the synchronization client and its connection, processing transport
/// events strictly in arrival order.
pub struct Session {
    client: SyncClient,
    switcher: LanguageSwitcher,
    transport: Box<dyn Transport>,
}

impl Session {
    /// Connect to the configured relay and join the identified room.
    pub async fn connect(
        config: SessionConfig,
        identity: RoomIdentity,
    ) -> Result<Self, TransportError> {
        let url = identity.endpoint_url(&config.server_authority, config.secure);
        let transport = WebSocketTransport::connect(&url).await?;
        Ok(Self::with_transport(
            identity,
            config.initial_language,
            Box::new(transport),
        ))
    }

    /// Assemble a session over any transport. Tests use channel-backed
    /// fakes here.
    pub fn with_transport(
        identity: RoomIdentity,
        initial_language: LanguageId,
        transport: Box<dyn Transport>,
    ) -> Self {
        let mut client = SyncClient::new(identity);
        // The editor surface starts from the active profile's placeholder.
        // The connection is not open yet, so nothing is transmitted; the
        // room's init snapshot replaces this for any room with history.
        client.on_local_change(LanguageProfile::of(initial_language).placeholder);
        Self {
            client,
            switcher: LanguageSwitcher::new(initial_language),
            transport,
        }
    }

    pub fn document(&self) -> &str {
        self.client.document()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.client.status()
    }

    pub fn language(&self) -> LanguageId {
        self.switcher.active()
    }

    /// A genuine local edit from the editor surface.
    pub fn local_change(&mut self, new_content: &str) {
        self.client.on_local_change(new_content);
        self.flush_outgoing();
    }

    /// Switch the active profile, applying the placeholder-replacement
    /// rule. A placeholder swap counts as a genuine edit and is broadcast.
    pub fn select_language(&mut self, id: &str) -> Result<LanguageSwitch, UnknownLanguageError> {
        let switch = self.switcher.select(id, self.client.document())?;
        if let Some(placeholder) = switch.replacement {
            self.client.on_local_change(placeholder);
            self.flush_outgoing();
        }
        Ok(switch)
    }

    /// Await and process the next connection event.
    ///
    /// Returns `None` once the connection has terminated and every pending
    /// event has been drained.
    pub async fn poll(&mut self) -> Option<SessionEvent> {
        loop {
            if let Some(event) = self.client.take_event() {
                return Some(match event {
                    ClientEvent::StatusChanged(status) => SessionEvent::StatusChanged(status),
                    ClientEvent::TransportFailed(error) => SessionEvent::TransportFailed(error),
                });
            }

            let event = self.transport.next_event().await?;
            match event {
                TransportEvent::Opened => self.client.on_open(),
                TransportEvent::Message(message) => {
                    if let Some(apply) = self.client.on_remote_message(message) {
                        return Some(SessionEvent::DocumentReplaced(apply));
                    }
                }
                TransportEvent::Closed => self.client.on_close(),
                TransportEvent::Failed(error) => self.client.on_transport_error(error),
            }
            debug_assert!(
                !self.client.has_outgoing(),
                "an inbound apply must never trigger an outbound update"
            );
        }
    }

    fn flush_outgoing(&mut self) {
        while let Some(message) = self.client.take_outgoing() {
            if self.transport.send(message).is_err() {
                // Best-effort delivery: a refused send is dropped, not retried.
                warn!("transport refused outbound update; dropping");
            }
        }
    }
}
