//! Application settings and configuration structures.

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::client::{ClientBuilder, ConnectionOptions};
use crate::protocol::codec::MAX_FRAME_LENGTH;
use crate::protocol::PROTOCOL_VERSION;
use crate::shared::validation::validation_error;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Target server and player identity
    pub client: ClientSettings,

    /// Timeouts and buffer sizes
    pub connection: ConnectionSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// What the binary does once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Print the server list status and exit
    Status,
    /// Log in and stay connected
    Play,
}

/// Target server and player identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientSettings {
    /// Server host name or address
    #[validate(length(min = 1, message = "must not be empty"))]
    pub host: String,

    #[validate(range(min = 1, message = "must be between 1 and 65535"))]
    pub port: u16,

    /// Offline-mode username
    #[validate(length(min = 1, max = 16, message = "must be 1 to 16 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "must not be negative"))]
    pub protocol_version: i32,

    pub mode: Mode,

    /// Chat message sent once logged in
    pub greeting: Option<String>,
}

/// Connection tuning.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConnectionSettings {
    #[validate(range(min = 1, message = "must be at least one second"))]
    pub connect_timeout_secs: u64,

    #[validate(range(min = 1, message = "must be at least one second"))]
    pub login_timeout_secs: u64,

    /// Outgoing queue and subscriber backlog capacity
    #[validate(range(min = 1, message = "must not be zero"))]
    pub event_buffer: usize,

    #[validate(range(min = 1, max = 2097151, message = "must be between 1 and 2097151"))]
    pub max_frame_length: usize,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. APP__SECTION__KEY environment variables
    /// 5. DIORITE_HOST, DIORITE_PORT and DIORITE_NAME (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(&environment)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__CLIENT__PORT=25566 -> client.port = 25566
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("client.host", std::env::var("DIORITE_HOST").ok())?
            .set_override_option("client.port", std::env::var("DIORITE_PORT").ok())?
            .set_override_option("client.name", std::env::var("DIORITE_NAME").ok())?
            .build()?;

        Self::from_config(config)
    }

    /// Builder holding the built-in defaults
    fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("client.host", "localhost")?
            .set_default("client.port", 25565)?
            .set_default("client.name", "diorite_client")?
            .set_default("client.protocol_version", PROTOCOL_VERSION)?
            .set_default("client.mode", "play")?
            .set_default("connection.connect_timeout_secs", 10)?
            .set_default("connection.login_timeout_secs", 30)?
            .set_default("connection.event_buffer", 1024)?
            .set_default("connection.max_frame_length", MAX_FRAME_LENGTH as i64)
    }

    /// Deserialize and validate a built configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        settings
            .client
            .validate()
            .map_err(|errors| validation_error("client", errors))?;
        settings
            .connection
            .validate()
            .map_err(|errors| validation_error("connection", errors))?;
        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.client.host, self.client.port)
    }

    /// Client builder preconfigured from these settings
    pub fn client_builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .host(self.client.host.clone())
            .port(self.client.port)
            .name(self.client.name.clone())
            .protocol_version(self.client.protocol_version)
            .options(self.connection.options())
    }
}

impl ConnectionSettings {
    pub fn options(&self) -> ConnectionOptions {
        ConnectionOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            login_timeout: Duration::from_secs(self.login_timeout_secs),
            event_buffer: self.event_buffer,
            max_frame_length: self.max_frame_length,
            ..ConnectionOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings_with(overrides: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let mut builder = Settings::defaults("test")?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        Settings::from_config(builder.build()?)
    }

    #[test]
    fn test_defaults() {
        let settings = settings_with(&[]).unwrap();
        assert_eq!(settings.environment, "test");
        assert_eq!(settings.server_addr(), "localhost:25565");
        assert_eq!(settings.client.name, "diorite_client");
        assert_eq!(settings.client.protocol_version, 758);
        assert_eq!(settings.client.mode, Mode::Play);
        assert_eq!(settings.client.greeting, None);
        assert_eq!(settings.connection.max_frame_length, 2_097_151);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let settings = settings_with(&[
            ("client.mode", "status"),
            ("client.port", "25566"),
            ("client.greeting", "hello"),
        ])
        .unwrap();
        assert_eq!(settings.client.mode, Mode::Status);
        assert_eq!(settings.client.port, 25566);
        assert_eq!(settings.client.greeting.as_deref(), Some("hello"));
    }

    #[test]
    fn test_rejects_port_zero() {
        let err = settings_with(&[("client.port", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "client.port: must be between 1 and 65535");
    }

    #[test]
    fn test_rejects_long_name() {
        let err = settings_with(&[("client.name", "a_name_that_is_too_long")]).unwrap_err();
        assert_eq!(err.to_string(), "client.name: must be 1 to 16 characters");
    }

    #[test]
    fn test_rejects_empty_event_buffer() {
        let err = settings_with(&[("connection.event_buffer", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "connection.event_buffer: must not be zero");
    }

    #[test]
    fn test_connection_options() {
        let settings = settings_with(&[("connection.login_timeout_secs", "5")]).unwrap();
        let options = settings.connection.options();
        assert_eq!(options.login_timeout, Duration::from_secs(5));
        assert_eq!(options.connect_timeout, Duration::from_secs(10));
        assert!(options.automatic_replies);
    }

    #[test]
    fn test_client_builder_uses_settings() {
        let settings = settings_with(&[("client.name", "bot")]).unwrap();
        let client = settings.client_builder().build().unwrap();
        assert_eq!(client.name(), "bot");
        assert_eq!(client.port(), 25565);
    }
}
