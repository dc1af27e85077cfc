//! Event-named wire protocol.
//!
//! The server speaks a message-based protocol: each frame is one JSON object
//! of the shape `{"event": <name>, "data": <payload>}`, delivered over a
//! persistent connection as newline-delimited lines. Event and field names
//! (`login`/`passwd`/`dvid`, `deviceLog`/`logData`, `valid`) are part of the
//! wire contract and must not change.

use serde::{Deserialize, Serialize};

/// Credential submitted once, immediately after connecting.
///
/// Not validated client-side; constructed from the configuration and sent
/// as the `login` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Login password.
    pub passwd: String,
    /// Device identifier.
    pub dvid: u32,
}

/// A single telemetry payload, constructed fresh per emission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Arbitrary log string; the demonstration client fills it with random
    /// ASCII letters.
    #[serde(rename = "logData")]
    pub log_data: String,
}

/// Events the client emits to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// `login` — credential submission, sent once at connection start.
    Login(Credential),
    /// `deviceLog` — one telemetry emission.
    DeviceLog(LogEntry),
}

/// Events the server emits to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// `valid` — login acknowledgment; `true` means the credential was
    /// accepted.
    Valid(bool),
}

impl ServerEvent {
    /// Whether a handler is registered for the named event.
    ///
    /// The dispatcher drops events with no handler; payloads for handled
    /// events must decode.
    pub(crate) fn handles(name: &str) -> bool { matches!(name, "valid") }
}
