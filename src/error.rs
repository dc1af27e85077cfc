//! Error types for client operations.

use std::io;

use tokio_util::codec::LinesCodecError;

/// Errors emitted by [`crate::client::DeviceClient`].
///
/// The client is deliberately fail-fast: none of these are retried or
/// recovered from, they propagate to the caller and terminate the session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport error.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
    /// Line framing error on the connection.
    #[error("frame error: {0}")]
    Frame(#[from] LinesCodecError),
    /// Failed to serialize an outbound event.
    #[error("failed to serialize event")]
    Serialize(#[source] serde_json::Error),
    /// Failed to deserialize an inbound event.
    #[error("failed to deserialize event")]
    Deserialize(#[source] serde_json::Error),
    /// The peer closed the connection.
    #[error("connection closed by peer")]
    Disconnected,
}
