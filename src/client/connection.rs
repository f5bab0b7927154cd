//! Server Connection
//!
//! A TCP connection split into a reader task and a writer task. The reader
//! decodes frames with the registry of the current state, applies state and
//! format transitions, and broadcasts every packet to subscribers. The
//! writer drains a queue of outgoing packets and acknowledges each one once
//! its frame is flushed.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::builder::ConnectionOptions;
use crate::infrastructure::metrics;
use crate::protocol::codec::{PacketCodec, SharedFormat};
use crate::protocol::component::Component;
use crate::protocol::format::PacketFormat;
use crate::protocol::packet::{clientbound, serverbound, ClientboundPacket, PacketKind, ServerboundPacket};
use crate::protocol::registries;
use crate::protocol::state::ConnectionState;
use crate::shared::error::{ClientError, ProtocolError};

/// Receiver of every packet decoded on a connection
pub type PacketReceiver = broadcast::Receiver<Arc<ClientboundPacket>>;

/// Sending side of the packet broadcast, handed to a connection when it opens
pub type PacketSender = broadcast::Sender<Arc<ClientboundPacket>>;

/// Packet broadcast sized for `options`
pub fn packet_channel(options: &ConnectionOptions) -> PacketSender {
    broadcast::channel(options.event_buffer.max(1)).0
}

/// Stream of the packets of type `T` on `packets`, ending when the
/// connection closes
pub fn packets_of<T>(packets: PacketReceiver) -> BoxStream<'static, T>
where
    T: PacketKind<ClientboundPacket> + Clone,
{
    futures::stream::unfold(packets, |mut packets| async move {
        loop {
            match packets.recv().await {
                Ok(packet) => {
                    if let Some(inner) = T::from_packet(&packet) {
                        return Some((inner.clone(), packets));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, packet = T::NAME, "Packet listener lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
    .boxed()
}

struct Outbound {
    packet: ServerboundPacket,
    flushed: Option<oneshot::Sender<Result<(), ProtocolError>>>,
}

struct Shared {
    peer: SocketAddr,
    outbound: mpsc::Sender<Outbound>,
    /// Taken on close so subscribers see the end of the stream
    packets: Mutex<Option<PacketSender>>,
    state: watch::Sender<ConnectionState>,
    format: SharedFormat,
    reason: Mutex<Option<Component>>,
    shutdown: CancellationToken,
}

impl Shared {
    fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    fn close(&self) {
        self.shutdown.cancel();
        self.packets.lock().take();
        self.state.send_replace(ConnectionState::Disconnected);
    }

    /// Apply the state and format change a packet implies.
    ///
    /// Returns whether the server ended the connection.
    fn apply(&self, packet: &ClientboundPacket) -> bool {
        match packet {
            ClientboundPacket::SetCompression(set) => {
                let format = PacketFormat::from_threshold(set.threshold);
                info!(threshold = set.threshold, "Compression enabled");
                *self.format.write() = format;
                false
            }
            ClientboundPacket::LoginSuccess(success) => {
                info!(uuid = %success.uuid, username = %success.username, "Logged in");
                self.state.send_replace(ConnectionState::Play);
                false
            }
            ClientboundPacket::LoginDisconnect(clientbound::login::Disconnect { reason })
            | ClientboundPacket::Disconnect(clientbound::play::Disconnect { reason }) => {
                info!(reason = %reason.plain_text(), "Disconnected by server");
                *self.reason.lock() = Some(reason.clone());
                true
            }
            _ => false,
        }
    }

    async fn enqueue(
        &self,
        packet: ServerboundPacket,
        flushed: Option<oneshot::Sender<Result<(), ProtocolError>>>,
    ) -> Result<(), ProtocolError> {
        self.outbound
            .send(Outbound { packet, flushed })
            .await
            .map_err(|_| ProtocolError::ChannelClosed)
    }
}

/// Reply the client sends on its own to keep a play session alive
pub fn automatic_reply(packet: &ClientboundPacket) -> Option<ServerboundPacket> {
    match packet {
        ClientboundPacket::KeepAlive(keep_alive) => Some(
            serverbound::play::KeepAlive { id: keep_alive.id }.into(),
        ),
        ClientboundPacket::Ping(ping) => Some(serverbound::play::Pong { id: ping.id }.into()),
        ClientboundPacket::PlayerPositionAndLook(teleport) => Some(
            serverbound::play::TeleportConfirm {
                teleport_id: teleport.teleport_id,
            }
            .into(),
        ),
        _ => None,
    }
}

/// Handle to an open connection; clones share the same socket.
#[derive(Clone)]
pub struct Connection {
    shared: Arc<Shared>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("peer", &self.peer())
            .field("state", &self.state())
            .field("format", &self.format())
            .finish()
    }
}

impl Connection {
    /// Connect to `host:port` within the configured timeout.
    pub async fn open(
        host: &str,
        port: u16,
        options: &ConnectionOptions,
    ) -> Result<Self, ClientError> {
        Self::open_with(host, port, options, packet_channel(options)).await
    }

    /// Like [`Connection::open`], broadcasting on `packets`.
    ///
    /// Receivers subscribed to `packets` beforehand see every packet of the
    /// connection, from the first one on.
    pub async fn open_with(
        host: &str,
        port: u16,
        options: &ConnectionOptions,
        packets: PacketSender,
    ) -> Result<Self, ClientError> {
        let stream = timeout(options.connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| ClientError::Timeout("connection"))??;
        stream.set_nodelay(true)?;

        let connection = Self::from_stream(stream, options, packets)?;
        info!(host = %host, port = port, peer = %connection.peer(), "Connected");
        Ok(connection)
    }

    /// Start the reader and writer tasks on an established stream.
    ///
    /// Must be called within a Tokio runtime.
    pub fn from_stream(
        stream: TcpStream,
        options: &ConnectionOptions,
        packets_tx: PacketSender,
    ) -> Result<Self, ClientError> {
        let peer = stream.peer_addr()?;
        let format: SharedFormat = Arc::new(RwLock::new(PacketFormat::Uncompressed));
        let codec = PacketCodec::new(format.clone()).with_max_frame_length(options.max_frame_length);

        let (read_half, write_half) = stream.into_split();
        let (outbound_tx, outbound_rx) = mpsc::channel(options.event_buffer.max(1));
        let (state_tx, _) = watch::channel(ConnectionState::Handshaking);

        let shared = Arc::new(Shared {
            peer,
            outbound: outbound_tx,
            packets: Mutex::new(Some(packets_tx.clone())),
            state: state_tx,
            format,
            reason: Mutex::new(None),
            shutdown: CancellationToken::new(),
        });

        metrics::connection_opened();
        tokio::spawn(read_loop(
            FramedRead::new(read_half, codec.clone()),
            packets_tx,
            shared.clone(),
            options.automatic_replies,
        ));
        tokio::spawn(write_loop(
            FramedWrite::new(write_half, codec),
            outbound_rx,
            shared.clone(),
        ));

        Ok(Self { shared })
    }

    pub fn peer(&self) -> SocketAddr {
        self.shared.peer
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    pub fn format(&self) -> PacketFormat {
        *self.shared.format.read()
    }

    /// Reason given by the server when it closed the connection
    pub fn disconnect_reason(&self) -> Option<Component> {
        self.shared.reason.lock().clone()
    }

    /// Queue a packet and wait until its frame has been flushed.
    ///
    /// A handshake moves the connection into its requested next state.
    pub async fn send(&self, packet: impl Into<ServerboundPacket>) -> Result<(), ProtocolError> {
        let packet = packet.into();
        if !self.state().is_open() {
            return Err(ProtocolError::ChannelClosed);
        }

        if let ServerboundPacket::Handshake(handshake) = &packet {
            self.shared.state.send_replace(handshake.next_state.into());
        }

        let (flushed_tx, flushed_rx) = oneshot::channel();
        self.shared.enqueue(packet, Some(flushed_tx)).await?;
        flushed_rx.await.map_err(|_| ProtocolError::ChannelClosed)?
    }

    /// Receive every packet decoded from now on.
    ///
    /// The receiver ends once the connection closes.
    pub fn subscribe(&self) -> PacketReceiver {
        match &*self.shared.packets.lock() {
            Some(sender) => sender.subscribe(),
            None => broadcast::channel(1).1,
        }
    }

    /// Stream of packets of one type
    pub fn on<T>(&self) -> BoxStream<'static, T>
    where
        T: PacketKind<ClientboundPacket> + Clone,
    {
        packets_of(self.subscribe())
    }

    /// Next packet from `packets`, or the reason the connection ended
    pub(crate) async fn recv(
        &self,
        packets: &mut PacketReceiver,
    ) -> Result<Arc<ClientboundPacket>, ClientError> {
        loop {
            match packets.recv().await {
                Ok(packet) => return Ok(packet),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, "Packet receiver lagged");
                }
                Err(RecvError::Closed) => return Err(self.closed_error()),
            }
        }
    }

    /// Wait for the next packet of type `T`, skipping others
    pub(crate) async fn wait_for<T>(&self, packets: &mut PacketReceiver) -> Result<T, ClientError>
    where
        T: PacketKind<ClientboundPacket> + Clone,
    {
        loop {
            let packet = self.recv(packets).await?;
            if let Some(inner) = T::from_packet(&packet) {
                return Ok(inner.clone());
            }
        }
    }

    fn closed_error(&self) -> ClientError {
        match self.disconnect_reason() {
            Some(reason) => ClientError::Disconnected(reason),
            None => ClientError::Protocol(ProtocolError::ChannelClosed),
        }
    }

    /// Close the socket; pending sends fail with `ChannelClosed`
    pub fn close(&self) {
        if self.state() != ConnectionState::Disconnected {
            debug!(peer = %self.peer(), "Closing connection");
        }
        self.shared.close();
    }

    /// Wait until the connection is closed by either side
    pub async fn closed(&self) {
        let mut state = self.shared.state.subscribe();
        let _ = state
            .wait_for(|state| *state == ConnectionState::Disconnected)
            .await;
    }
}

async fn read_loop(
    mut frames: FramedRead<OwnedReadHalf, PacketCodec>,
    packets: PacketSender,
    shared: Arc<Shared>,
    automatic_replies: bool,
) {
    loop {
        let frame = tokio::select! {
            _ = shared.shutdown.cancelled() => break,
            frame = frames.next() => frame,
        };

        let raw = match frame {
            Some(Ok(raw)) => raw,
            Some(Err(err)) => {
                if let ProtocolError::Decode(decode) = &err {
                    metrics::record_decode_error(decode.kind());
                }
                error!(error = %err, "Connection failed");
                break;
            }
            None => {
                debug!("Server closed the connection");
                break;
            }
        };

        let state = shared.state();
        let packet = match registries::clientbound(state).decode(&raw) {
            Ok(packet) => packet,
            Err(err) if err.is_ignorable() => {
                metrics::record_decode_error(err.kind());
                warn!(error = %err, "Skipping packet");
                continue;
            }
            Err(err) => {
                metrics::record_decode_error(err.kind());
                error!(error = %err, "Failed to decode packet");
                break;
            }
        };

        debug!(state = %state, packet = packet.name(), "Received packet");
        metrics::record_packet_received(state, packet.name());

        let closing = shared.apply(&packet);
        if automatic_replies && !closing {
            if let Some(reply) = automatic_reply(&packet) {
                if shared.enqueue(reply, None).await.is_err() {
                    break;
                }
            }
        }

        // No subscribers is fine
        let _ = packets.send(Arc::new(packet));
        if closing {
            break;
        }
    }

    shared.close();
    metrics::connection_closed();
}

async fn write_loop(
    mut sink: FramedWrite<OwnedWriteHalf, PacketCodec>,
    mut outbound: mpsc::Receiver<Outbound>,
    shared: Arc<Shared>,
) {
    loop {
        let message = tokio::select! {
            _ = shared.shutdown.cancelled() => break,
            message = outbound.recv() => match message {
                Some(message) => message,
                None => break,
            },
        };

        let state = shared.state();
        let name = message.packet.name();
        let result = match message.packet.to_raw() {
            Ok(raw) => sink.send(raw).await,
            Err(err) => Err(err.into()),
        };
        let fatal = match &result {
            Ok(()) => {
                debug!(state = %state, packet = name, "Sent packet");
                metrics::record_packet_sent(state, name);
                false
            }
            Err(err) if !err.is_fatal() => {
                warn!(error = %err, packet = name, "Dropped unencodable packet");
                false
            }
            Err(err) => {
                error!(error = %err, packet = name, "Failed to send packet");
                true
            }
        };

        if let Some(flushed) = message.flushed {
            let _ = flushed.send(result);
        }
        if fatal {
            shared.close();
            break;
        }
    }

    let _ = sink.close().await;
}
