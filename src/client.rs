//! Device client session lifecycle.
//!
//! A session is one connection for the lifetime of the process: connect,
//! submit the credential, pause briefly, emit one telemetry payload, then
//! keep dispatching inbound events until the peer goes away or the process
//! is terminated externally. There is no retry, no backoff, and no
//! reconnection; every failure propagates as a [`ClientError`].

use futures::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::watch, time};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::ClientError,
    wire::{ClientEvent, Credential, LogEntry, ServerEvent},
};

/// A connected device client.
///
/// The login acknowledgment is surfaced through a one-element notification
/// channel rather than a shared flag: the dispatch loop is the single
/// writer, and any number of consumers can await [`acknowledged`]
/// resolving instead of busy-polling.
///
/// [`acknowledged`]: DeviceClient::acknowledged
///
/// # Examples
///
/// ```no_run
/// use devicelog::{ClientConfig, DeviceClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), devicelog::ClientError> {
/// let client = DeviceClient::connect(ClientConfig::default()).await?;
/// client.run().await?;
/// # Ok(())
/// # }
/// ```
pub struct DeviceClient {
    framed: Framed<TcpStream, LinesCodec>,
    config: ClientConfig,
    ack_tx: watch::Sender<Option<bool>>,
}

impl DeviceClient {
    /// Open one connection to the configured endpoint.
    ///
    /// There is no connect timeout and no retry; an unreachable endpoint
    /// surfaces immediately as [`ClientError::Io`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the connection cannot be established.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr).await?;
        info!(%addr, "connected");

        let (ack_tx, _) = watch::channel(None);
        Ok(Self {
            framed: Framed::new(stream, LinesCodec::new()),
            config,
            ack_tx,
        })
    }

    /// Subscribe to the login acknowledgment.
    ///
    /// The receiver starts at `None` and changes at most to `Some(flag)`
    /// when the server emits `valid`. Nothing in the canonical session
    /// consumes it; it exists so a future protocol step can await the
    /// acknowledgment instead of sleeping.
    #[must_use]
    pub fn acknowledged(&self) -> watch::Receiver<Option<bool>> { self.ack_tx.subscribe() }

    /// Run the canonical session to completion.
    ///
    /// Submits the credential, pauses for the configured startup delay,
    /// emits exactly one telemetry payload, then dispatches inbound events
    /// indefinitely. The delay is behavioural parity with the original
    /// deployment; it does not synchronize with the acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on any emit or dispatch failure, including
    /// [`ClientError::Disconnected`] when the peer closes the connection.
    pub async fn run(mut self) -> Result<(), ClientError> {
        self.login().await?;
        time::sleep(self.config.startup_delay).await;
        self.send_log().await?;
        self.dispatch().await
    }

    /// Emit the `login` event carrying the configured credential.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the event cannot be encoded or written.
    pub async fn login(&mut self) -> Result<(), ClientError> {
        let credential = Credential {
            passwd: self.config.password.clone(),
            dvid: self.config.device_id,
        };
        debug!(dvid = credential.dvid, "sending login");
        self.send(&ClientEvent::Login(credential)).await
    }

    /// Emit one `deviceLog` event with a freshly generated payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the event cannot be encoded or written.
    pub async fn send_log(&mut self) -> Result<(), ClientError> {
        let entry = LogEntry::random(self.config.log_length);
        debug!(len = entry.log_data.len(), "sending device log");
        self.send(&ClientEvent::DeviceLog(entry)).await
    }

    /// Dispatch inbound events until the connection ends.
    ///
    /// Only the `valid` event has a handler; events with other names are
    /// logged and dropped, as a dispatcher with no handler registered
    /// would. Malformed JSON, or a payload that does not decode for a
    /// handled event, is a protocol violation and fails the session. End
    /// of stream surfaces as [`ClientError::Disconnected`] so the caller
    /// fails fast rather than returning successfully from an unfinished
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on framing errors, malformed payloads, or
    /// peer disconnect.
    pub async fn dispatch(&mut self) -> Result<(), ClientError> {
        while let Some(frame) = self.framed.next().await {
            let line = frame?;
            match serde_json::from_str(&line) {
                Ok(event) => self.handle_event(event),
                Err(err) => Self::skip_unhandled(&line, err)?,
            }
        }
        Err(ClientError::Disconnected)
    }

    /// Distinguish an event nobody listens for from a broken payload.
    fn skip_unhandled(line: &str, err: serde_json::Error) -> Result<(), ClientError> {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(ClientError::Deserialize)?;
        match value.get("event").and_then(serde_json::Value::as_str) {
            Some(name) if !ServerEvent::handles(name) => {
                warn!(event = name, "ignoring unhandled event");
                Ok(())
            }
            _ => Err(ClientError::Deserialize(err)),
        }
    }

    fn handle_event(&self, event: ServerEvent) {
        match event {
            ServerEvent::Valid(accepted) => {
                info!(accepted, "login acknowledged");
                self.ack_tx.send_replace(Some(accepted));
            }
        }
    }

    async fn send(&mut self, event: &ClientEvent) -> Result<(), ClientError> {
        let line = serde_json::to_string(event).map_err(ClientError::Serialize)?;
        self.framed.send(line).await?;
        Ok(())
    }
}
