//! Command line interface for the `devicelog` binary.
//!
//! Running with no arguments reproduces the canonical demonstration
//! session against `localhost:3000`.

use clap::Parser;

use devicelog::ClientConfig;

/// Command line arguments for the `devicelog` binary.
#[derive(Debug, Parser)]
#[command(name = "devicelog", version, about = "Demonstration device telemetry client")]
pub struct Cli {
    /// Server hostname.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Cli {
    /// Build the client configuration from the parsed arguments.
    #[must_use]
    pub fn into_config(self) -> ClientConfig {
        ClientConfig::default().host(self.host).port(self.port)
    }
}
