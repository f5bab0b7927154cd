//! Common Test Utilities
//!
//! An in-process fake server speaking the server side of the protocol.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_util::codec::Framed;
use uuid::Uuid;

use diorite::client::ClientBuilder;
use diorite::protocol::packet::clientbound::{login, ClientboundPacket};
use diorite::protocol::packet::ServerboundPacket;
use diorite::protocol::{registries, ConnectionState, PacketCodec, PacketFormat, RawPacket};

/// Upper bound on any single step, so a broken test fails instead of hanging
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// Test server builder
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    /// Bind to an ephemeral local port
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        Self { listener }
    }

    pub fn addr(&self) -> SocketAddr {
        self.listener.local_addr().unwrap()
    }

    /// Client builder pointed at this server
    pub fn client(&self) -> ClientBuilder {
        ClientBuilder::new()
            .host("127.0.0.1")
            .port(self.addr().port())
            .login_timeout(STEP_TIMEOUT)
    }

    pub async fn accept(&self) -> ServerConnection {
        let (stream, _) = timeout(STEP_TIMEOUT, self.listener.accept())
            .await
            .expect("no client connected")
            .unwrap();
        ServerConnection::new(stream)
    }
}

/// Server side of one connection
pub struct ServerConnection {
    framed: Framed<TcpStream, PacketCodec>,
    format: Arc<RwLock<PacketFormat>>,
    pub state: ConnectionState,
}

impl ServerConnection {
    fn new(stream: TcpStream) -> Self {
        let format = Arc::new(RwLock::new(PacketFormat::Uncompressed));
        let codec = PacketCodec::new(format.clone());
        Self {
            framed: Framed::new(stream, codec),
            format,
            state: ConnectionState::Handshaking,
        }
    }

    /// Next packet from the client, or `None` once it hung up
    pub async fn recv(&mut self) -> Option<ServerboundPacket> {
        let raw = timeout(STEP_TIMEOUT, self.framed.next())
            .await
            .expect("client sent nothing")?
            .ok()?;
        let packet = registries::serverbound(self.state)
            .decode(&raw)
            .expect("client sent an undecodable packet");

        if let ServerboundPacket::Handshake(handshake) = &packet {
            self.state = handshake.next_state.into();
        }
        Some(packet)
    }

    /// Next packet from the client, which must exist
    pub async fn expect(&mut self) -> ServerboundPacket {
        self.recv().await.expect("client disconnected")
    }

    pub async fn send(&mut self, packet: impl Into<ClientboundPacket>) {
        let packet = packet.into();
        if let ClientboundPacket::LoginSuccess(_) = &packet {
            self.state = ConnectionState::Play;
        }
        self.framed.send(packet.to_raw().unwrap()).await.unwrap();
    }

    /// Send a frame with an arbitrary id and body
    pub async fn send_raw(&mut self, id: i32, payload: &'static [u8]) {
        self.framed
            .send(RawPacket {
                id,
                payload: Bytes::from_static(payload),
            })
            .await
            .unwrap();
    }

    /// Announce compression and switch this side's format
    pub async fn enable_compression(&mut self, threshold: i32) {
        self.send(login::SetCompression { threshold }).await;
        *self.format.write() = PacketFormat::from_threshold(threshold);
    }

    /// Read the handshake and login start, returning the requested name
    pub async fn expect_login_start(&mut self) -> String {
        match self.expect().await {
            ServerboundPacket::Handshake(handshake) => {
                assert_eq!(handshake.protocol_version, 758);
                assert_eq!(handshake.server_address, "127.0.0.1");
            }
            other => panic!("expected handshake, got {:?}", other),
        }
        assert_eq!(self.state, ConnectionState::Login);

        match self.expect().await {
            ServerboundPacket::LoginStart(start) => start.name,
            other => panic!("expected login start, got {:?}", other),
        }
    }

    /// Complete an offline-mode login, returning the player's UUID
    pub async fn accept_login(&mut self) -> Uuid {
        let username = self.expect_login_start().await;
        let uuid = Uuid::new_v4();
        self.send(login::LoginSuccess { uuid, username }).await;
        uuid
    }
}
