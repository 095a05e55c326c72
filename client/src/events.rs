use crate::client::ConnectionStatus;
use crate::error::TransportError;

/// Events the synchronization client surfaces to the embedding UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The connection status indicator should change.
    StatusChanged(ConnectionStatus),
    /// A transport fault to surface as a log line.
    TransportFailed(TransportError),
}
