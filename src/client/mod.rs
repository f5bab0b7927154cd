//! # Client
//!
//! A headless Minecraft client: logs in to an offline-mode server, keeps the
//! session alive and exposes the packet stream.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diorite::client::Client;
//! use diorite::protocol::packet::clientbound::play::ChatMessage;
//! use futures::StreamExt;
//!
//! let client = Client::builder().host("localhost").connect().await?;
//! client.chat("hello").await?;
//!
//! let mut messages = client.on::<ChatMessage>()?;
//! while let Some(message) = messages.next().await {
//!     println!("{}", message.message);
//! }
//! ```

mod builder;
mod connection;
mod status;

pub use builder::{ClientBuilder, ConnectionOptions, DEFAULT_HOST, DEFAULT_NAME, DEFAULT_PORT};
pub use connection::{
    automatic_reply, packet_channel, packets_of, Connection, PacketReceiver, PacketSender,
};
pub use status::{PlayerSample, ServerStatus, StatusPlayers, StatusVersion};

use std::sync::Arc;

use futures::stream::BoxStream;
use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

use crate::protocol::component::Component;
use crate::protocol::packet::clientbound::login::LoginSuccess;
use crate::protocol::packet::serverbound::handshaking::{Handshake, NextState};
use crate::protocol::packet::serverbound::login::{LoginPluginResponse, LoginStart};
use crate::protocol::packet::serverbound::play::{ChatMessage, MAX_CHAT_LEN};
use crate::protocol::packet::{ClientboundPacket, PacketKind, ServerboundPacket};
use crate::protocol::state::ConnectionState;
use crate::shared::error::ClientError;

/// A client for one server.
///
/// Created by [`ClientBuilder`]; connects at most once.
#[derive(Debug, Clone)]
pub struct Client {
    host: String,
    port: u16,
    name: String,
    protocol_version: i32,
    options: ConnectionOptions,
    connection: Option<Connection>,
    uuid: Option<Uuid>,
    /// Broadcast the next connection will use; taken by `connect`
    pending: Arc<Mutex<Option<PacketSender>>>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn new(
        host: String,
        port: u16,
        name: String,
        protocol_version: i32,
        options: ConnectionOptions,
    ) -> Self {
        let pending = Arc::new(Mutex::new(Some(packet_channel(&options))));
        Self {
            host,
            port,
            name,
            protocol_version,
            options,
            connection: None,
            uuid: None,
            pending,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Username, as confirmed by the server once logged in
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protocol_version(&self) -> i32 {
        self.protocol_version
    }

    /// Player UUID assigned by the server, once logged in
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    pub fn state(&self) -> ConnectionState {
        self.connection
            .as_ref()
            .map(Connection::state)
            .unwrap_or(ConnectionState::NotConnected)
    }

    pub fn connection(&self) -> Result<&Connection, ClientError> {
        self.connection.as_ref().ok_or(ClientError::NotConnected)
    }

    /// Log in to the server.
    ///
    /// Sends the handshake and login start, then waits for login success
    /// within the login timeout, answering plugin requests on the way.
    ///
    /// # Errors
    ///
    /// - `AlreadyConnected` if called twice
    /// - `Disconnected` if the server rejects the login
    /// - `EncryptionUnsupported` if the server is in online mode
    /// - `Timeout` if login success does not arrive in time
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self.connection.is_some() {
            return Err(ClientError::AlreadyConnected);
        }

        info!(host = %self.host, port = self.port, name = %self.name, "Connecting");
        let packets = self
            .pending
            .lock()
            .take()
            .unwrap_or_else(|| packet_channel(&self.options));
        let connection =
            Connection::open_with(&self.host, self.port, &self.options, packets).await?;

        let login = timeout(self.options.login_timeout, self.login(&connection))
            .await
            .map_err(|_| ClientError::Timeout("login success"))
            .and_then(|result| result);

        match login {
            Ok(success) => {
                self.name = success.username;
                self.uuid = Some(success.uuid);
                self.connection = Some(connection);
                Ok(())
            }
            Err(err) => {
                connection.close();
                Err(err)
            }
        }
    }

    async fn login(&self, connection: &Connection) -> Result<LoginSuccess, ClientError> {
        let mut packets = connection.subscribe();

        connection
            .send(Handshake {
                protocol_version: self.protocol_version,
                server_address: self.host.clone(),
                server_port: self.port,
                next_state: NextState::Login,
            })
            .await?;
        connection
            .send(LoginStart {
                name: self.name.clone(),
            })
            .await?;

        loop {
            let packet = connection.recv(&mut packets).await?;
            match packet.as_ref() {
                ClientboundPacket::LoginSuccess(success) => return Ok(success.clone()),
                ClientboundPacket::LoginDisconnect(disconnect) => {
                    return Err(ClientError::Disconnected(disconnect.reason.clone()));
                }
                ClientboundPacket::EncryptionRequest(_) => {
                    return Err(ClientError::EncryptionUnsupported);
                }
                ClientboundPacket::LoginPluginRequest(request) => {
                    debug!(channel = %request.channel, "Declining login plugin request");
                    connection
                        .send(LoginPluginResponse {
                            message_id: request.message_id,
                            data: None,
                        })
                        .await?;
                }
                _ => {}
            }
        }
    }

    /// Send a chat message, or a command if it starts with `/`.
    pub async fn chat(&self, message: impl Into<String>) -> Result<(), ClientError> {
        let message = message.into();
        let len = message.chars().count();
        if len > MAX_CHAT_LEN {
            return Err(ClientError::MessageTooLong {
                len,
                max: MAX_CHAT_LEN,
            });
        }
        self.send(ChatMessage { message }).await
    }

    /// Run `/name args...`; arguments containing whitespace are quoted.
    pub async fn command(&self, name: &str, args: &[&str]) -> Result<(), ClientError> {
        self.chat(command_line(name, args)).await
    }

    /// Send a packet and wait until it has been flushed
    pub async fn send(&self, packet: impl Into<ServerboundPacket>) -> Result<(), ClientError> {
        self.connection()?.send(packet).await?;
        Ok(())
    }

    /// Receive every packet from now on.
    ///
    /// Subscribing before [`Client::connect`] also catches the packets the
    /// server sends during login and right after it, such as JoinGame.
    pub fn subscribe(&self) -> Result<PacketReceiver, ClientError> {
        if let Some(connection) = &self.connection {
            return Ok(connection.subscribe());
        }
        self.pending
            .lock()
            .as_ref()
            .map(PacketSender::subscribe)
            .ok_or(ClientError::NotConnected)
    }

    /// Stream of packets of one type, ending when the connection closes.
    ///
    /// Like [`Client::subscribe`], this may be called before connecting.
    pub fn on<T>(&self) -> Result<BoxStream<'static, T>, ClientError>
    where
        T: PacketKind<ClientboundPacket> + Clone,
    {
        Ok(packets_of(self.subscribe()?))
    }

    /// Close the connection
    pub fn disconnect(&self) {
        if let Some(connection) = &self.connection {
            info!(host = %self.host, "Disconnecting");
            connection.close();
        }
    }

    /// Wait until the connection closes, returning the server's reason if it
    /// gave one.
    pub async fn await_disconnect(&self) -> Result<Option<Component>, ClientError> {
        let connection = self.connection()?;
        connection.closed().await;
        Ok(connection.disconnect_reason())
    }

    /// Query the server list status without logging in
    pub async fn status(&self) -> Result<ServerStatus, ClientError> {
        status::query(&self.host, self.port, self.protocol_version, &self.options).await
    }
}

/// Format `/name args...`, quoting arguments that contain whitespace
pub fn command_line(name: &str, args: &[&str]) -> String {
    let mut line = format!("/{}", name.trim_start_matches('/'));
    for arg in args {
        line.push(' ');
        if arg.chars().any(char::is_whitespace) {
            line.push('"');
            for c in arg.chars() {
                if c == '"' || c == '\\' {
                    line.push('\\');
                }
                line.push(c);
            }
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
