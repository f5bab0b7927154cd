//! Client Builder

use std::time::Duration;

use crate::protocol::codec::MAX_FRAME_LENGTH;
use crate::protocol::packet::serverbound::login::MAX_USERNAME_LEN;
use crate::protocol::PROTOCOL_VERSION;
use crate::shared::error::ClientError;

use super::status::ServerStatus;
use super::Client;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 25565;
pub const DEFAULT_NAME: &str = "diorite_client";

/// Tuning of a single connection.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub connect_timeout: Duration,

    /// Bound on the whole login sequence, and on each status exchange
    pub login_timeout: Duration,

    /// Capacity of the outgoing queue and of each subscriber's backlog
    pub event_buffer: usize,

    pub max_frame_length: usize,

    /// Answer keep alives, pings and teleports without the caller's help
    pub automatic_replies: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(30),
            event_buffer: 1024,
            max_frame_length: MAX_FRAME_LENGTH,
            automatic_replies: true,
        }
    }
}

/// Builds a [`Client`].
///
/// ```rust,ignore
/// let client = Client::builder()
///     .host("play.example.net")
///     .name("bot")
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    host: String,
    port: u16,
    name: String,
    protocol_version: i32,
    options: ConnectionOptions,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            name: DEFAULT_NAME.to_string(),
            protocol_version: PROTOCOL_VERSION,
            options: ConnectionOptions::default(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Announce a different protocol version in the handshake.
    ///
    /// Packet layouts stay those of 1.18.2, so servers on other versions
    /// will likely reject or confuse the client.
    pub fn protocol_version(mut self, protocol_version: i32) -> Self {
        self.protocol_version = protocol_version;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = timeout;
        self
    }

    pub fn login_timeout(mut self, timeout: Duration) -> Self {
        self.options.login_timeout = timeout;
        self
    }

    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.options.event_buffer = capacity;
        self
    }

    pub fn max_frame_length(mut self, length: usize) -> Self {
        self.options.max_frame_length = length;
        self
    }

    pub fn automatic_replies(mut self, enabled: bool) -> Self {
        self.options.automatic_replies = enabled;
        self
    }

    pub fn options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the settings and create a client that is not yet connected.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the port is 0, the name is not 1 to 16
    /// characters long, the host is empty, the protocol version is negative
    /// or the event buffer is empty.
    pub fn build(self) -> Result<Client, ClientError> {
        if self.port == 0 {
            return Err(ClientError::InvalidPort(self.port));
        }

        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_USERNAME_LEN {
            return Err(ClientError::InvalidName(self.name));
        }

        if self.host.trim().is_empty() {
            return Err(ClientError::EmptyHost);
        }

        if self.protocol_version < 0 {
            return Err(ClientError::InvalidProtocolVersion(self.protocol_version));
        }

        let mut options = self.options;
        // Tokio channels panic on zero capacity
        options.event_buffer = options.event_buffer.max(1);

        Ok(Client::new(
            self.host,
            self.port,
            self.name,
            self.protocol_version,
            options,
        ))
    }

    /// Build and log in
    pub async fn connect(self) -> Result<Client, ClientError> {
        let mut client = self.build()?;
        client.connect().await?;
        Ok(client)
    }

    /// Build and query the server list status
    pub async fn status(self) -> Result<ServerStatus, ClientError> {
        self.build()?.status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::state::ConnectionState;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(client.host(), "localhost");
        assert_eq!(client.port(), 25565);
        assert_eq!(client.name(), "diorite_client");
        assert_eq!(client.protocol_version(), 758);
        assert_eq!(client.state(), ConnectionState::NotConnected);
    }

    #[test]
    fn test_rejects_port_zero() {
        let err = ClientBuilder::new().port(0).build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidPort(0)));
    }

    #[test_case("" ; "empty")]
    #[test_case("seventeen_chars_x" ; "too long")]
    fn test_rejects_invalid_name(name: &str) {
        let err = ClientBuilder::new().name(name).build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidName(_)));
    }

    #[test]
    fn test_accepts_sixteen_char_name() {
        let client = ClientBuilder::new().name("sixteen_chars_xx").build().unwrap();
        assert_eq!(client.name(), "sixteen_chars_xx");
    }

    #[test]
    fn test_rejects_empty_host() {
        let err = ClientBuilder::new().host("  ").build().unwrap_err();
        assert!(matches!(err, ClientError::EmptyHost));
    }

    #[test]
    fn test_rejects_negative_protocol_version() {
        let err = ClientBuilder::new().protocol_version(-1).build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidProtocolVersion(-1)));
    }
}
