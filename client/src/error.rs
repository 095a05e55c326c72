use thiserror::Error;

/// Failures of the realtime connection
///
/// A transport failure is terminal for the session: the status indicator
/// flips, a log line is appended, and no reconnect is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection could not be established
    #[error("Failed to connect to {url}: {detail}")]
    ConnectFailed {
        url: String,
        detail: String,
    },

    /// The transport faulted after opening
    #[error("Connection fault: {detail}. The session is terminal; start a new session to rejoin the room")]
    Fault {
        detail: String,
    },
}
