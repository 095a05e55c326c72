use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// A synchronization message exchanged with the room.
///
/// On the wire each message is a UTF-8 JSON object tagged by its `type`
/// field. Tags outside the known set deserialize to [`SyncMessage::Unknown`]
/// so newer peers never break older ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncMessage {
    /// Sent once by the room to a newly joined client; replaces the local
    /// document.
    Init { content: String },
    /// Sent by a client on a genuine local edit; relayed by the room to
    /// every other member.
    Update { content: String },
    /// Broadcast by the room when a member disconnects.
    UserLeft { client_id: String },
    /// Any unrecognized `type`; applied as a no-op.
    #[serde(other)]
    Unknown,
}

impl SyncMessage {
    /// Decode one inbound frame.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame).map_err(|err| ProtocolError::MalformedFrame {
            detail: err.to_string(),
        })
    }

    /// Encode for transmission.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|err| ProtocolError::EncodeFailed {
            detail: err.to_string(),
        })
    }

    /// The document snapshot carried by this message, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            SyncMessage::Init { content } | SyncMessage::Update { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_init_and_update() {
        let init = SyncMessage::decode(r#"{"type":"init","content":"print(1)"}"#).unwrap();
        assert_eq!(
            init,
            SyncMessage::Init {
                content: "print(1)".to_string()
            }
        );

        let update = SyncMessage::decode(r#"{"type":"update","content":""}"#).unwrap();
        assert_eq!(
            update,
            SyncMessage::Update {
                content: String::new()
            }
        );
    }

    #[test]
    fn unknown_type_is_tolerated() {
        let message = SyncMessage::decode(r#"{"type":"cursor_moved","line":3}"#).unwrap();
        assert_eq!(message, SyncMessage::Unknown);
        assert_eq!(message.content(), None);
    }

    #[test]
    fn malformed_frame_is_an_error() {
        assert!(matches!(
            SyncMessage::decode("not json"),
            Err(ProtocolError::MalformedFrame { .. })
        ));
        assert!(matches!(
            SyncMessage::decode(r#"{"content":"x"}"#),
            Err(ProtocolError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn encode_round_trips() {
        let message = SyncMessage::Update {
            content: "a\nb".to_string(),
        };
        let frame = message.encode().unwrap();
        assert_eq!(SyncMessage::decode(&frame).unwrap(), message);
    }

    #[test]
    fn wire_tags_are_lowercase() {
        let frame = SyncMessage::Init {
            content: String::new(),
        }
        .encode()
        .unwrap();
        assert!(frame.contains(r#""type":"init""#));

        let frame = SyncMessage::UserLeft {
            client_id: "c1".to_string(),
        }
        .encode()
        .unwrap();
        assert!(frame.contains(r#""type":"user_left""#));
    }
}
