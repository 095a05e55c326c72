//! Property coverage for the echo-suppression invariants.

use codepad_client::{ClientEvent, ConnectionStatus, SyncClient};
use codepad_shared::{RoomIdentity, SyncMessage};
use proptest::prelude::*;

fn open_client() -> SyncClient {
    let mut client = SyncClient::new(RoomIdentity::new("r1", "c1"));
    client.on_open();
    assert_eq!(
        client.take_event(),
        Some(ClientEvent::StatusChanged(ConnectionStatus::Open))
    );
    client
}

proptest! {
    // Applying the same snapshot twice mutates nothing the second time and
    // never re-broadcasts, for any content.
    #[test]
    fn update_application_is_idempotent(content in ".*") {
        let mut client = open_client();
        let first = client.on_remote_message(SyncMessage::Update { content: content.clone() });
        drop(first);
        prop_assert_eq!(client.document(), content.as_str());

        let second = client.on_remote_message(SyncMessage::Update { content: content.clone() });
        prop_assert!(second.is_none());
        prop_assert!(client.take_outgoing().is_none());
    }

    // Any sequence of inbound messages triggers exactly zero outbound
    // updates, even when each apply is reflected back as an editor change
    // while the guard is engaged.
    #[test]
    fn inbound_never_triggers_outbound(contents in proptest::collection::vec(".*", 0..16)) {
        let mut client = open_client();
        for content in contents {
            let apply = client.on_remote_message(SyncMessage::Update { content });
            if let Some(apply) = &apply {
                let reflected = apply.content().to_string();
                client.on_local_change(&reflected);
            }
            drop(apply);
        }
        prop_assert!(client.take_outgoing().is_none());
    }
}
