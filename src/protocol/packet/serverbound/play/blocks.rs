//! Digging, placing and editing blocks.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::types::DiggingStatus;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{BlockFace, BlockPosition, Hand, Identifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDigging {
    pub status: DiggingStatus,
    pub location: BlockPosition,
    pub face: BlockFace,
}

impl Packet for PlayerDigging {
    const ID: i32 = 0x1A;
    const NAME: &'static str = "PlayerDigging";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.status)
            .write_block_position(&self.location)
            .write_i8_enum(self.face);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            status: r.read_enum()?,
            location: r.read_block_position()?,
            face: r.read_i8_enum()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBlockPlacement {
    pub hand: Hand,
    pub location: BlockPosition,
    pub face: BlockFace,
    /// Cursor position on the face, each in `0.0..=1.0`
    pub cursor_x: f32,
    pub cursor_y: f32,
    pub cursor_z: f32,
    pub inside_block: bool,
}

impl Packet for PlayerBlockPlacement {
    const ID: i32 = 0x2E;
    const NAME: &'static str = "PlayerBlockPlacement";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.hand)
            .write_block_position(&self.location)
            .write_enum(self.face)
            .write_f32(self.cursor_x)
            .write_f32(self.cursor_y)
            .write_f32(self.cursor_z)
            .write_bool(self.inside_block);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            hand: r.read_enum()?,
            location: r.read_block_position()?,
            face: r.read_enum()?,
            cursor_x: r.read_f32_in("cursor_x", 0.0, 1.0)?,
            cursor_y: r.read_f32_in("cursor_y", 0.0, 1.0)?,
            cursor_z: r.read_f32_in("cursor_z", 0.0, 1.0)?,
            inside_block: r.read_bool()?,
        })
    }
}

/// Jigsaw structure generation from a jigsaw block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateStructure {
    pub location: BlockPosition,
    pub levels: i32,
    pub keep_jigsaws: bool,
}

impl Packet for GenerateStructure {
    const ID: i32 = 0x0E;
    const NAME: &'static str = "GenerateStructure";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_var_int(self.levels)
            .write_bool(self.keep_jigsaws);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            levels: r.read_var_int()?,
            keep_jigsaws: r.read_bool()?,
        })
    }
}

wire_enum! {
    pub enum CommandBlockMode {
        Sequence = 0,
        Auto = 1,
        Redstone = 2,
    }
}

/// Bits of [`UpdateCommandBlock::flags`]
pub mod command_block_flags {
    pub const TRACK_OUTPUT: i8 = 0x01;
    pub const CONDITIONAL: i8 = 0x02;
    pub const AUTOMATIC: i8 = 0x04;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommandBlock {
    pub location: BlockPosition,
    pub command: String,
    pub mode: CommandBlockMode,
    pub flags: i8,
}

impl Packet for UpdateCommandBlock {
    const ID: i32 = 0x26;
    const NAME: &'static str = "UpdateCommandBlock";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_string(&self.command)
            .write_enum(self.mode)
            .write_i8(self.flags);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            command: r.read_string(32_767)?,
            mode: r.read_enum()?,
            flags: r.read_i8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommandBlockMinecart {
    pub entity_id: i32,
    pub command: String,
    pub track_output: bool,
}

impl Packet for UpdateCommandBlockMinecart {
    const ID: i32 = 0x27;
    const NAME: &'static str = "UpdateCommandBlockMinecart";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_string(&self.command)
            .write_bool(self.track_output);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            command: r.read_string(32_767)?,
            track_output: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateJigsawBlock {
    pub location: BlockPosition,
    pub name: Identifier,
    pub target: Identifier,
    pub pool: Identifier,
    pub final_state: String,
    /// `rollable` or `aligned`
    pub joint_type: String,
}

impl Packet for UpdateJigsawBlock {
    const ID: i32 = 0x29;
    const NAME: &'static str = "UpdateJigsawBlock";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_identifier(&self.name)
            .write_identifier(&self.target)
            .write_identifier(&self.pool)
            .write_string(&self.final_state)
            .write_string(&self.joint_type);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            name: r.read_identifier()?,
            target: r.read_identifier()?,
            pool: r.read_identifier()?,
            final_state: r.read_string(32_767)?,
            joint_type: r.read_string(32_767)?,
        })
    }
}

wire_enum! {
    pub enum StructureBlockAction {
        UpdateData = 0,
        SaveStructure = 1,
        LoadStructure = 2,
        DetectSize = 3,
    }
}

wire_enum! {
    pub enum StructureBlockMode {
        Save = 0,
        Load = 1,
        Corner = 2,
        Data = 3,
    }
}

wire_enum! {
    pub enum Mirror {
        None = 0,
        LeftRight = 1,
        FrontBack = 2,
    }
}

wire_enum! {
    pub enum Rotation {
        None = 0,
        Clockwise90 = 1,
        Clockwise180 = 2,
        Counterclockwise90 = 3,
    }
}

/// Bits of [`UpdateStructureBlock::flags`]
pub mod structure_block_flags {
    pub const IGNORE_ENTITIES: i8 = 0x01;
    pub const SHOW_AIR: i8 = 0x02;
    pub const SHOW_BOUNDING_BOX: i8 = 0x04;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStructureBlock {
    pub location: BlockPosition,
    pub action: StructureBlockAction,
    pub mode: StructureBlockMode,
    pub name: String,
    /// Each in `-48..=48`
    pub offset: (i8, i8, i8),
    /// Each in `0..=48`
    pub size: (i8, i8, i8),
    pub mirror: Mirror,
    pub rotation: Rotation,
    pub metadata: String,
    /// `0.0..=1.0`
    pub integrity: f32,
    pub seed: i64,
    pub flags: i8,
}

impl Packet for UpdateStructureBlock {
    const ID: i32 = 0x2A;
    const NAME: &'static str = "UpdateStructureBlock";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_enum(self.action)
            .write_enum(self.mode)
            .write_string(&self.name)
            .write_i8(self.offset.0)
            .write_i8(self.offset.1)
            .write_i8(self.offset.2)
            .write_i8(self.size.0)
            .write_i8(self.size.1)
            .write_i8(self.size.2)
            .write_enum(self.mirror)
            .write_enum(self.rotation)
            .write_string(&self.metadata)
            .write_f32(self.integrity)
            .write_var_long(self.seed)
            .write_i8(self.flags);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            action: r.read_enum()?,
            mode: r.read_enum()?,
            name: r.read_string(32_767)?,
            offset: (
                r.read_i8_in("offset_x", -48, 48)?,
                r.read_i8_in("offset_y", -48, 48)?,
                r.read_i8_in("offset_z", -48, 48)?,
            ),
            size: (
                r.read_i8_in("size_x", 0, 48)?,
                r.read_i8_in("size_y", 0, 48)?,
                r.read_i8_in("size_z", 0, 48)?,
            ),
            mirror: r.read_enum()?,
            rotation: r.read_enum()?,
            metadata: r.read_string(128)?,
            integrity: r.read_f32_in("integrity", 0.0, 1.0)?,
            seed: r.read_var_long()?,
            flags: r.read_i8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSign {
    pub location: BlockPosition,
    pub lines: [String; 4],
}

impl Packet for UpdateSign {
    const ID: i32 = 0x2B;
    const NAME: &'static str = "UpdateSign";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location);
        for line in &self.lines {
            w.write_string(line);
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            lines: [
                r.read_string(384)?,
                r.read_string(384)?,
                r.read_string(384)?,
                r.read_string(384)?,
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_digging_face_is_a_byte() {
        let packet = PlayerDigging {
            status: DiggingStatus::StartedDigging,
            location: BlockPosition::new(0, 64, 0),
            face: BlockFace::Top,
        };
        let bytes = encode(&packet);
        assert_eq!(bytes.len(), 1 + 8 + 1);
        assert_eq!(bytes[9], 1);
        assert_eq!(decode::<PlayerDigging>(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_structure_block_enums_are_var_ints() {
        let packet = UpdateStructureBlock {
            location: BlockPosition::new(10, 70, -3),
            action: StructureBlockAction::SaveStructure,
            mode: StructureBlockMode::Save,
            name: "house".to_owned(),
            offset: (0, 1, 0),
            size: (5, 5, 5),
            mirror: Mirror::FrontBack,
            rotation: Rotation::Clockwise90,
            metadata: String::new(),
            integrity: 1.0,
            seed: 0,
            flags: structure_block_flags::SHOW_BOUNDING_BOX,
        };
        let bytes = encode(&packet);
        // location, action, mode, name, offset, size, then mirror and rotation
        assert_eq!(&bytes[8 + 1 + 1 + 6 + 6..8 + 1 + 1 + 6 + 6 + 2], &[2, 1]);
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_structure_size_out_of_range() {
        let mut packet_bytes = encode(&UpdateStructureBlock {
            location: BlockPosition::new(0, 0, 0),
            action: StructureBlockAction::UpdateData,
            mode: StructureBlockMode::Data,
            name: String::new(),
            offset: (0, 0, 0),
            size: (0, 0, 0),
            mirror: Mirror::None,
            rotation: Rotation::None,
            metadata: String::new(),
            integrity: 0.5,
            seed: 1,
            flags: 0,
        });
        // size_x sits after location, action, mode, empty name and offset
        packet_bytes[8 + 1 + 1 + 1 + 3] = 49;
        assert!(matches!(
            decode::<UpdateStructureBlock>(&packet_bytes),
            Err(DecodeError::InvalidField { field: "size_x", .. })
        ));
    }

    #[test]
    fn test_structure_accepts_full_size_range() {
        let packet = UpdateStructureBlock {
            location: BlockPosition::new(0, 0, 0),
            action: StructureBlockAction::SaveStructure,
            mode: StructureBlockMode::Save,
            name: "tower".to_owned(),
            offset: (-48, 40, 48),
            size: (48, 40, 0),
            mirror: Mirror::None,
            rotation: Rotation::None,
            metadata: String::new(),
            integrity: 1.0,
            seed: 0,
            flags: 0,
        };
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_update_sign() {
        let packet = UpdateSign {
            location: BlockPosition::new(1, 2, 3),
            lines: [
                "Welcome".to_owned(),
                String::new(),
                "to".to_owned(),
                "spawn".to_owned(),
            ],
        };
        assert_eq!(reencode(&packet), packet);
    }
}
