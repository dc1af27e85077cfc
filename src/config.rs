//! Client configuration.
//!
//! The original deployment hardcodes its endpoint and credential as
//! module-level constants; here they live in an explicit [`ClientConfig`]
//! passed to the client constructor so tests and callers can substitute
//! their own values.

use std::time::Duration;

/// Configuration for a [`crate::client::DeviceClient`] session.
///
/// The default value reproduces the canonical demonstration setup: the
/// `test` credential for device `1` against `localhost:3000`, a ten-letter
/// log payload, and a 500 ms startup delay before the first emission.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use devicelog::ClientConfig;
///
/// let config = ClientConfig::default()
///     .host("device-gw.internal")
///     .port(4000)
///     .startup_delay(Duration::from_millis(100));
/// assert_eq!(config.addr(), "device-gw.internal:4000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) password: String,
    pub(crate) device_id: u32,
    pub(crate) log_length: usize,
    pub(crate) startup_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
            password: "test".to_string(),
            device_id: 1,
            log_length: 10,
            startup_delay: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Replace the server hostname.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Replace the server port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replace the login password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Replace the device identifier sent with the login event.
    #[must_use]
    pub fn device_id(mut self, device_id: u32) -> Self {
        self.device_id = device_id;
        self
    }

    /// Replace the length of the generated log payload.
    #[must_use]
    pub fn log_length(mut self, log_length: usize) -> Self {
        self.log_length = log_length;
        self
    }

    /// Replace the pause between login and the first log emission.
    #[must_use]
    pub fn startup_delay(mut self, startup_delay: Duration) -> Self {
        self.startup_delay = startup_delay;
        self
    }

    /// The `host:port` string the client connects to.
    ///
    /// # Examples
    ///
    /// ```
    /// use devicelog::ClientConfig;
    ///
    /// assert_eq!(ClientConfig::default().addr(), "localhost:3000");
    /// ```
    #[must_use]
    pub fn addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}
