use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use codepad_shared::SyncMessage;
use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

/// Key for one live connection. Connection-scoped rather than client-id
/// scoped so a client id reused across sessions cannot evict a live member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey(u64);

struct Member {
    client_id: String,
    outbound: UnboundedSender<String>,
}

#[derive(Default)]
struct Room {
    members: HashMap<MemberKey, Member>,
}

#[derive(Default)]
struct RegistryInner {
    rooms: HashMap<String, Room>,
    /// Room content outlives the member table: a brief full departure must
    /// not lose the document.
    content: HashMap<String, String>,
}

/// Tracks live rooms: which connections are in each, and each room's
/// current document.
#[derive(Default)]
pub struct RoomRegistry {
    next_key: AtomicU64,
    inner: Mutex<RegistryInner>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to `room_id`, delivering the `init` snapshot before
    /// any relayed traffic can reach the new member.
    pub async fn join(
        &self,
        room_id: &str,
        client_id: &str,
        outbound: UnboundedSender<String>,
    ) -> MemberKey {
        let key = MemberKey(self.next_key.fetch_add(1, Ordering::Relaxed));
        let mut inner = self.inner.lock().await;

        let content = inner.content.entry(room_id.to_string()).or_default().clone();
        let init = SyncMessage::Init { content };
        match init.encode() {
            Ok(frame) => {
                let _ = outbound.send(frame);
            }
            Err(err) => warn!("failed to encode init snapshot: {err}"),
        }

        let room = inner.rooms.entry(room_id.to_string()).or_default();
        room.members.insert(
            key,
            Member {
                client_id: client_id.to_string(),
                outbound,
            },
        );
        info!(
            "client '{}' connected to room '{}' ({} member(s))",
            client_id,
            room_id,
            room.members.len()
        );
        key
    }

    /// Relay one inbound frame from `sender` to every other member of the
    /// room, updating the room document when the frame is an update.
    ///
    /// The frame is relayed verbatim so fields this server does not know
    /// about survive the hop; parsing only decides whether to touch state.
    pub async fn relay(&self, room_id: &str, sender: MemberKey, frame: &str) {
        let message = match SyncMessage::decode(frame) {
            Ok(message) => message,
            Err(err) => {
                warn!("dropping frame in room '{}': {}", room_id, err);
                return;
            }
        };

        let mut inner = self.inner.lock().await;
        if let SyncMessage::Update { content } = &message {
            inner
                .content
                .insert(room_id.to_string(), content.clone());
        }

        let Some(room) = inner.rooms.get(room_id) else {
            return;
        };
        for (key, member) in &room.members {
            if *key == sender {
                continue;
            }
            if member.outbound.send(frame.to_string()).is_err() {
                warn!(
                    "failed to relay to client '{}' in room '{}'",
                    member.client_id, room_id
                );
            }
        }
    }

    /// Remove a connection, announcing the departure to the remainder. The
    /// member table is dropped once empty; the room's content is kept.
    pub async fn leave(&self, room_id: &str, key: MemberKey) {
        let mut inner = self.inner.lock().await;
        let Some(room) = inner.rooms.get_mut(room_id) else {
            return;
        };
        let Some(member) = room.members.remove(&key) else {
            return;
        };
        info!(
            "client '{}' disconnected from room '{}'",
            member.client_id, room_id
        );

        if room.members.is_empty() {
            inner.rooms.remove(room_id);
            return;
        }

        let notice = SyncMessage::UserLeft {
            client_id: member.client_id,
        };
        match notice.encode() {
            Ok(frame) => {
                for other in room.members.values() {
                    let _ = other.outbound.send(frame.clone());
                }
            }
            Err(err) => warn!("failed to encode departure notice: {err}"),
        }
    }

    /// Current document of a room, if the room has ever had content set.
    pub async fn room_content(&self, room_id: &str) -> Option<String> {
        self.inner.lock().await.content.get(room_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn encoded_update(content: &str) -> String {
        SyncMessage::Update {
            content: content.to_string(),
        }
        .encode()
        .unwrap()
    }

    #[tokio::test]
    async fn join_delivers_the_snapshot_first() {
        let registry = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _key = registry.join("r", "alice", tx).await;

        let frame = rx.recv().await.unwrap();
        assert_eq!(
            SyncMessage::decode(&frame).unwrap(),
            SyncMessage::Init {
                content: String::new()
            }
        );
    }

    #[tokio::test]
    async fn relay_skips_the_sender() {
        let registry = RoomRegistry::new();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        let alice = registry.join("r", "alice", alice_tx).await;
        let _bob = registry.join("r", "bob", bob_tx).await;
        let _ = alice_rx.recv().await;
        let _ = bob_rx.recv().await;

        registry.relay("r", alice, &encoded_update("x")).await;

        assert_eq!(bob_rx.recv().await.unwrap(), encoded_update("x"));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn content_outlives_an_empty_room() {
        let registry = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let key = registry.join("r", "alice", tx).await;
        let _ = rx.recv().await;

        registry.relay("r", key, &encoded_update("kept")).await;
        registry.leave("r", key).await;
        assert_eq!(registry.room_content("r").await.as_deref(), Some("kept"));

        // A later joiner sees the retained document.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _key = registry.join("r", "bob", tx).await;
        let frame = rx.recv().await.unwrap();
        assert_eq!(
            SyncMessage::decode(&frame).unwrap(),
            SyncMessage::Init {
                content: "kept".to_string()
            }
        );
    }

    #[tokio::test]
    async fn departures_notify_the_remainder() {
        let registry = RoomRegistry::new();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        let _alice = registry.join("r", "alice", alice_tx).await;
        let bob = registry.join("r", "bob", bob_tx).await;
        let _ = alice_rx.recv().await;
        let _ = bob_rx.recv().await;

        registry.leave("r", bob).await;

        let frame = alice_rx.recv().await.unwrap();
        assert_eq!(
            SyncMessage::decode(&frame).unwrap(),
            SyncMessage::UserLeft {
                client_id: "bob".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_frames_touch_nothing() {
        let registry = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let key = registry.join("r", "alice", tx).await;
        let _ = rx.recv().await;

        registry.relay("r", key, "not json").await;
        assert_eq!(registry.room_content("r").await.as_deref(), Some(""));
    }
}
