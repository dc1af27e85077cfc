//! Binary entry point for the demonstration session.
//!
//! Connects, logs in, emits one telemetry payload, then blocks dispatching
//! inbound events. Any failure propagates and terminates the process with
//! a nonzero exit code.

mod cli;

use clap::Parser;
use devicelog::DeviceClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = cli::Cli::parse().into_config();
    let client = DeviceClient::connect(config).await?;
    client.run().await?;
    Ok(())
}
