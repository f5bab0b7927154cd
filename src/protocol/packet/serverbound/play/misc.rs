//! Keep alive, plugin channels, queries and settings.

use bytes::Bytes;

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{BlockPosition, Difficulty, Identifier};

/// Echo of a clientbound keep alive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAlive {
    pub id: i64,
}

impl Packet for KeepAlive {
    const ID: i32 = 0x0F;
    const NAME: &'static str = "KeepAlive";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self { id: r.read_i64()? })
    }
}

/// Answer to a clientbound ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    pub id: i32,
}

impl Packet for Pong {
    const ID: i32 = 0x1D;
    const NAME: &'static str = "Pong";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self { id: r.read_i32()? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMessage {
    pub channel: Identifier,
    pub data: Bytes,
}

impl Packet for PluginMessage {
    const ID: i32 = 0x0A;
    const NAME: &'static str = "PluginMessage";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_identifier(&self.channel).write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            channel: r.read_identifier()?,
            data: r.read_remaining(),
        })
    }
}

/// Block entity NBT request, used by the debug screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBlockNbt {
    pub transaction_id: i32,
    pub location: BlockPosition,
}

impl Packet for QueryBlockNbt {
    const ID: i32 = 0x01;
    const NAME: &'static str = "QueryBlockNbt";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.transaction_id)
            .write_block_position(&self.location);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_id: r.read_var_int()?,
            location: r.read_block_position()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEntityNbt {
    pub transaction_id: i32,
    pub entity_id: i32,
}

impl Packet for QueryEntityNbt {
    const ID: i32 = 0x0C;
    const NAME: &'static str = "QueryEntityNbt";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.transaction_id)
            .write_var_int(self.entity_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_id: r.read_var_int()?,
            entity_id: r.read_var_int()?,
        })
    }
}

/// Singleplayer only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDifficulty {
    pub difficulty: Difficulty,
}

impl Packet for SetDifficulty {
    const ID: i32 = 0x02;
    const NAME: &'static str = "SetDifficulty";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8_enum(self.difficulty);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            difficulty: r.read_u8_enum()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockDifficulty {
    pub locked: bool,
}

impl Packet for LockDifficulty {
    const ID: i32 = 0x10;
    const NAME: &'static str = "LockDifficulty";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bool(self.locked);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            locked: r.read_bool()?,
        })
    }
}

wire_enum! {
    pub enum ResourcePackResult {
        SuccessfullyLoaded = 0,
        Declined = 1,
        FailedDownload = 2,
        Accepted = 3,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackStatus {
    pub result: ResourcePackResult,
}

impl Packet for ResourcePackStatus {
    const ID: i32 = 0x21;
    const NAME: &'static str = "ResourcePackStatus";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.result);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            result: r.read_enum()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvancementTab {
    OpenedTab(Identifier),
    ClosedScreen,
}

impl Packet for AdvancementTab {
    const ID: i32 = 0x22;
    const NAME: &'static str = "AdvancementTab";

    fn encode(&self, w: &mut PacketWriter) {
        match self {
            AdvancementTab::OpenedTab(tab) => {
                w.write_var_int(0).write_identifier(tab);
            }
            AdvancementTab::ClosedScreen => {
                w.write_var_int(1);
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        match r.read_var_int()? {
            0 => Ok(AdvancementTab::OpenedTab(r.read_identifier()?)),
            1 => Ok(AdvancementTab::ClosedScreen),
            id => Err(DecodeError::UnknownEnumId {
                kind: "AdvancementTabAction",
                id,
            }),
        }
    }
}
