//! # Diorite
//!
//! A headless Minecraft Java Edition client.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - The client, in status or play mode

use anyhow::Result;
use tracing::info;

use diorite::config::Settings;
use diorite::shared::release::ReleaseChannel;
use diorite::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        diorite::telemetry::init_tracing_json();
    } else {
        diorite::telemetry::init_tracing();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        channel = %ReleaseChannel::current(),
        protocol = diorite::protocol::PROTOCOL_VERSION,
        "Starting Diorite..."
    );

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.client.host,
        port = %settings.client.port,
        mode = ?settings.client.mode,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings)?;
    application.run_until_stopped().await?;

    Ok(())
}
