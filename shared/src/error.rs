use thiserror::Error;

/// Errors that can occur while encoding or decoding wire frames
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Inbound frame was not a well-formed message object
    #[error("Malformed frame received: {detail}. Frames must be UTF-8 JSON objects with a 'type' field")]
    MalformedFrame {
        detail: String,
    },

    /// Outbound message failed to serialize
    #[error("Failed to encode outbound message: {detail}")]
    EncodeFailed {
        detail: String,
    },
}

/// Raised when a profile id outside the registered set is selected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language '{id}'. Registered profiles are 'python' and 'javascript'")]
pub struct UnknownLanguageError {
    /// The id that failed to resolve
    pub id: String,
}
