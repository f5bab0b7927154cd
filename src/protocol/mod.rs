//! Protocol
//!
//! Wire format of the Minecraft Java Edition protocol, version 758
//! (1.18.2): primitives, NBT, chat components, packets, registries and
//! framing.

pub mod codec;
pub mod component;
pub mod format;
pub mod io;
pub mod item;
pub mod nbt;
pub mod packet;
pub mod registries;
pub mod registry;
pub mod state;

pub use codec::{PacketCodec, RawPacket, SharedFormat, MAX_FRAME_LENGTH};
pub use format::{Compression, PacketFormat, ZlibCompression};
pub use packet::{ClientboundPacket, Packet, PacketKind, ServerboundPacket};
pub use registry::PacketRegistry;
pub use state::ConnectionState;

/// Protocol version spoken by default
pub const PROTOCOL_VERSION: i32 = 758;

/// Game version matching [`PROTOCOL_VERSION`]
pub const GAME_VERSION: &str = "1.18.2";
