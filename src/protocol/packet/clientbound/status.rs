//! Clientbound status packets.

use crate::protocol::io::{PacketReader, PacketWriter, MAX_STRING_LEN};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

/// Server list information as a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub json: String,
}

impl Packet for Response {
    const ID: i32 = 0x00;
    const NAME: &'static str = "StatusResponse";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.json);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            json: r.read_string(MAX_STRING_LEN)?,
        })
    }
}

/// Echo of the client's ping payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong {
    pub payload: i64,
}

impl Packet for Pong {
    const ID: i32 = 0x01;
    const NAME: &'static str = "StatusPong";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.payload);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            payload: r.read_i64()?,
        })
    }
}
