//! Demonstration device-telemetry client.
//!
//! This crate connects to a real-time messaging endpoint, authenticates
//! with a fixed credential, emits one randomly generated log payload after
//! a short startup delay, and then keeps the connection open dispatching
//! inbound events until the process is terminated.
//!
//! It is a thin reference client, not infrastructure: there is no
//! reconnection, no retry, and no recovery. Every failure propagates as a
//! [`ClientError`] and ends the session.

pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod wire;

pub use client::DeviceClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use wire::{ClientEvent, Credential, LogEntry, ServerEvent};
