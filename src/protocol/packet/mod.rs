//! Packets
//!
//! One struct per packet of protocol 758, grouped by direction and state.
//! Every struct implements [`Packet`]; the [`ClientboundPacket`] and
//! [`ServerboundPacket`] enums wrap them for dispatch.

pub mod clientbound;
pub mod serverbound;
mod types;

pub use clientbound::ClientboundPacket;
pub use serverbound::ServerboundPacket;
pub use types::DiggingStatus;

use super::io::{PacketReader, PacketWriter};
use crate::shared::error::DecodeError;

/// A packet body with a fixed id in its state.
pub trait Packet: Sized + Send + Sync + 'static {
    const ID: i32;
    const NAME: &'static str;

    fn encode(&self, w: &mut PacketWriter);

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError>;
}

/// Typed view into a packet enum, used to filter a stream of packets down
/// to one kind.
pub trait PacketKind<E>: Packet {
    fn from_packet(packet: &E) -> Option<&Self>;
}
