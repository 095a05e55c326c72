/// Immutable (room, client) pair fixed at session start.
///
/// Determines the connection endpoint; never renegotiated. A dropped
/// connection is terminal for the session, so a reconnecting user starts
/// over with a fresh identity pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomIdentity {
    room_id: String,
    client_id: String,
}

impl RoomIdentity {
    pub fn new(room_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            client_id: client_id.into(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Endpoint path on the relay server for this identity.
    pub fn endpoint_path(&self) -> String {
        format!("/ws/{}/{}", self.room_id, self.client_id)
    }

    /// Full WebSocket URL against the given authority, e.g. `127.0.0.1:8000`.
    pub fn endpoint_url(&self, authority: &str, secure: bool) -> String {
        let scheme = if secure { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, authority, self.endpoint_path())
    }
}
