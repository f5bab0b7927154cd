//! Serverbound status packets.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

/// Asks for the server list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request;

impl Packet for Request {
    const ID: i32 = 0x00;
    const NAME: &'static str = "StatusRequest";

    fn encode(&self, _w: &mut PacketWriter) {}

    fn decode(_r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

/// Latency check, echoed back in a pong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ping {
    pub payload: i64,
}

impl Packet for Ping {
    const ID: i32 = 0x01;
    const NAME: &'static str = "StatusPing";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.payload);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            payload: r.read_i64()?,
        })
    }
}
