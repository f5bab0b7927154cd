//! Application Startup
//!
//! Builds the client from settings and runs the configured mode.

use anyhow::Result;
use futures::StreamExt;
use tracing::{info, warn};

use crate::client::Client;
use crate::config::{Mode, Settings};
use crate::protocol::packet::clientbound::play::ChatMessage;

/// Application instance
pub struct Application {
    client: Client,
    mode: Mode,
    greeting: Option<String>,
}

impl Application {
    /// Build the application from settings
    pub fn build(settings: Settings) -> Result<Self> {
        let client = settings.client_builder().build()?;
        Ok(Self {
            client,
            mode: settings.client.mode,
            greeting: settings.client.greeting,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Run until the mode completes, the server disconnects or Ctrl-C
    pub async fn run_until_stopped(self) -> Result<()> {
        match self.mode {
            Mode::Status => self.print_status().await,
            Mode::Play => self.play().await,
        }
    }

    async fn print_status(self) -> Result<()> {
        let status = self.client.status().await?;
        let players = status
            .players
            .as_ref()
            .map(|players| format!("{}/{}", players.online, players.max))
            .unwrap_or_else(|| "?".to_string());
        let latency = status
            .latency
            .map(|latency| format!("{}ms", latency.as_millis()))
            .unwrap_or_else(|| "?".to_string());

        println!("{}:{}", self.client.host(), self.client.port());
        println!("  version: {} ({})", status.version.name, status.version.protocol);
        println!("  players: {}", players);
        println!("  motd:    {}", status.description.plain_text());
        println!("  latency: {}", latency);
        Ok(())
    }

    async fn play(mut self) -> Result<()> {
        self.client.connect().await?;
        info!(
            name = %self.client.name(),
            uuid = ?self.client.uuid(),
            "Joined server"
        );

        let mut messages = self.client.on::<ChatMessage>()?;
        let chat_log = tokio::spawn(async move {
            while let Some(chat) = messages.next().await {
                info!(position = ?chat.position, sender = %chat.sender, "{}", chat.message.plain_text());
            }
        });

        if let Some(greeting) = &self.greeting {
            self.client.chat(greeting.clone()).await?;
        }

        tokio::select! {
            reason = self.client.await_disconnect() => {
                match reason? {
                    Some(reason) => warn!(reason = %reason.plain_text(), "Disconnected by server"),
                    None => warn!("Connection closed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, disconnecting");
                self.client.disconnect();
            }
        }

        chat_log.abort();
        Ok(())
    }
}
