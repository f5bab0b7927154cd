//! Server List Ping
//!
//! Queries the status shown in the multiplayer server list and measures the
//! round trip with a ping.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use super::builder::ConnectionOptions;
use super::connection::Connection;
use crate::infrastructure::metrics;
use crate::protocol::component::Component;
use crate::protocol::packet::serverbound::handshaking::{Handshake, NextState};
use crate::protocol::packet::{clientbound, serverbound};
use crate::shared::error::ClientError;

/// Status reported by a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version: StatusVersion,

    /// Absent when the server hides its player count
    #[serde(default)]
    pub players: Option<StatusPlayers>,

    /// Message of the day
    #[serde(default = "empty_description")]
    pub description: Component,

    /// `data:image/png;base64,` encoded 64x64 icon
    #[serde(default)]
    pub favicon: Option<String>,

    /// Round trip of the ping that followed the status request
    #[serde(skip)]
    pub latency: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVersion {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPlayers {
    pub max: i32,
    pub online: i32,
    #[serde(default)]
    pub sample: Vec<PlayerSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSample {
    pub name: String,
    pub id: Uuid,
}

fn empty_description() -> Component {
    Component::text("")
}

impl ServerStatus {
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        serde_json::from_str(json).map_err(ClientError::InvalidStatus)
    }
}

/// Run the status exchange against `host:port`.
pub(crate) async fn query(
    host: &str,
    port: u16,
    protocol_version: i32,
    options: &ConnectionOptions,
) -> Result<ServerStatus, ClientError> {
    let connection = Connection::open(host, port, options).await?;
    let result = exchange(&connection, host, port, protocol_version, options.login_timeout).await;
    connection.close();
    result
}

async fn exchange(
    connection: &Connection,
    host: &str,
    port: u16,
    protocol_version: i32,
    limit: Duration,
) -> Result<ServerStatus, ClientError> {
    let mut packets = connection.subscribe();

    connection
        .send(Handshake {
            protocol_version,
            server_address: host.to_string(),
            server_port: port,
            next_state: NextState::Status,
        })
        .await?;
    connection.send(serverbound::status::Request).await?;

    let response = timeout(
        limit,
        connection.wait_for::<clientbound::status::Response>(&mut packets),
    )
    .await
    .map_err(|_| ClientError::Timeout("status response"))??;
    let mut status = ServerStatus::from_json(&response.json)?;

    let payload: i64 = rand::random();
    let started = Instant::now();
    connection.send(serverbound::status::Ping { payload }).await?;

    let pong = timeout(
        limit,
        connection.wait_for::<clientbound::status::Pong>(&mut packets),
    )
    .await
    .map_err(|_| ClientError::Timeout("status pong"))??;
    if pong.payload != payload {
        return Err(ClientError::UnexpectedPacket("StatusPong"));
    }

    let latency = started.elapsed();
    metrics::record_status_latency(latency.as_secs_f64());
    debug!(latency_ms = latency.as_millis() as u64, "Status received");

    status.latency = Some(latency);
    Ok(status)
}
