//! Serverbound handshaking packets.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::protocol::state::ConnectionState;
use crate::shared::error::DecodeError;

/// Server addresses are limited to 255 characters
pub const MAX_ADDRESS_LEN: usize = 255;

wire_enum! {
    /// State requested by a handshake
    pub enum NextState {
        Status = 1,
        Login = 2,
    }
}

impl From<NextState> for ConnectionState {
    fn from(next: NextState) -> Self {
        match next {
            NextState::Status => ConnectionState::Status,
            NextState::Login => ConnectionState::Login,
        }
    }
}

/// First packet of every connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

impl Packet for Handshake {
    const ID: i32 = 0x00;
    const NAME: &'static str = "Handshake";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.protocol_version)
            .write_string(&self.server_address)
            .write_u16(self.server_port)
            .write_enum(self.next_state);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            protocol_version: r.read_var_int()?,
            server_address: r.read_string(MAX_ADDRESS_LEN)?,
            server_port: r.read_u16()?,
            next_state: r.read_enum()?,
        })
    }
}
