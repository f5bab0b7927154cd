//! Blocks, chunks, light and world events.

use bytes::Bytes;

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::nbt::Compound;
use crate::protocol::packet::types::DiggingStatus;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{BlockPosition, Difficulty, Identifier};

/// Light nibble arrays are always one byte per two blocks of a 16³ section
pub const LIGHT_ARRAY_LEN: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationDestination {
    Block(BlockPosition),
    Entity(i32),
}

/// Sculk sensor vibration travelling towards a block or entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SculkVibrationSignal {
    pub source: BlockPosition,
    pub destination: VibrationDestination,
    pub arrival_ticks: i32,
}

impl Packet for SculkVibrationSignal {
    const ID: i32 = 0x05;
    const NAME: &'static str = "SculkVibrationSignal";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.source);
        match &self.destination {
            VibrationDestination::Block(position) => {
                w.write_identifier(&Identifier::from_static("minecraft", "block"))
                    .write_block_position(position);
            }
            VibrationDestination::Entity(entity_id) => {
                w.write_identifier(&Identifier::from_static("minecraft", "entity"))
                    .write_var_int(*entity_id);
            }
        }
        w.write_var_int(self.arrival_ticks);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let source = r.read_block_position()?;
        let kind = r.read_identifier()?;
        let destination = match kind.value() {
            "block" => VibrationDestination::Block(r.read_block_position()?),
            "entity" => VibrationDestination::Entity(r.read_var_int()?),
            other => {
                return Err(DecodeError::invalid(
                    "destination",
                    format!("unknown destination type {}", other),
                ))
            }
        };
        Ok(Self {
            source,
            destination,
            arrival_ticks: r.read_var_int()?,
        })
    }
}

/// Server verdict on a digging action sent by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckPlayerDigging {
    pub location: BlockPosition,
    pub block: i32,
    pub status: DiggingStatus,
    pub successful: bool,
}

impl Packet for AckPlayerDigging {
    const ID: i32 = 0x08;
    const NAME: &'static str = "AckPlayerDigging";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_var_int(self.block)
            .write_enum(self.status)
            .write_bool(self.successful);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            block: r.read_var_int()?,
            status: r.read_enum()?,
            successful: r.read_bool()?,
        })
    }
}

/// Block crack overlay; stages outside 0..=9 remove it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBreakAnimation {
    pub entity_id: i32,
    pub location: BlockPosition,
    pub destroy_stage: i8,
}

impl Packet for BlockBreakAnimation {
    const ID: i32 = 0x09;
    const NAME: &'static str = "BlockBreakAnimation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_block_position(&self.location)
            .write_i8(self.destroy_stage);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            location: r.read_block_position()?,
            destroy_stage: r.read_i8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityData {
    pub location: BlockPosition,
    pub block_entity_type: i32,
    /// `None` removes the block entity
    pub data: Option<Compound>,
}

impl Packet for BlockEntityData {
    const ID: i32 = 0x0A;
    const NAME: &'static str = "BlockEntityData";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_var_int(self.block_entity_type)
            .write_optional_compound(self.data.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            block_entity_type: r.read_var_int()?,
            data: r.read_optional_compound()?,
        })
    }
}

/// Block animation such as a chest lid or a note block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAction {
    pub location: BlockPosition,
    pub action_id: u8,
    pub action_param: u8,
    pub block_type: i32,
}

impl Packet for BlockAction {
    const ID: i32 = 0x0B;
    const NAME: &'static str = "BlockAction";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_u8(self.action_id)
            .write_u8(self.action_param)
            .write_var_int(self.block_type);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            action_id: r.read_u8()?,
            action_param: r.read_u8()?,
            block_type: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChange {
    pub location: BlockPosition,
    pub block_id: i32,
}

impl Packet for BlockChange {
    const ID: i32 = 0x0C;
    const NAME: &'static str = "BlockChange";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location)
            .write_var_int(self.block_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            block_id: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDifficulty {
    pub difficulty: Difficulty,
    pub locked: bool,
}

impl Packet for ServerDifficulty {
    const ID: i32 = 0x0E;
    const NAME: &'static str = "ServerDifficulty";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8_enum(self.difficulty).write_bool(self.locked);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            difficulty: r.read_u8_enum()?,
            locked: r.read_bool()?,
        })
    }
}

/// Offset of a destroyed block relative to the explosion center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplosionRecord {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub strength: f32,
    pub records: Vec<ExplosionRecord>,
    pub player_motion_x: f32,
    pub player_motion_y: f32,
    pub player_motion_z: f32,
}

impl Packet for Explosion {
    const ID: i32 = 0x1C;
    const NAME: &'static str = "Explosion";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f32(self.x)
            .write_f32(self.y)
            .write_f32(self.z)
            .write_f32(self.strength)
            .write_list(&self.records, |w, record| {
                w.write_i8(record.x).write_i8(record.y).write_i8(record.z);
            })
            .write_f32(self.player_motion_x)
            .write_f32(self.player_motion_y)
            .write_f32(self.player_motion_z);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
            strength: r.read_f32()?,
            records: r.read_list(|r| {
                Ok(ExplosionRecord {
                    x: r.read_i8()?,
                    y: r.read_i8()?,
                    z: r.read_i8()?,
                })
            })?,
            player_motion_x: r.read_f32()?,
            player_motion_y: r.read_f32()?,
            player_motion_z: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnloadChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

impl Packet for UnloadChunk {
    const ID: i32 = 0x1D;
    const NAME: &'static str = "UnloadChunk";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.chunk_x).write_i32(self.chunk_z);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            chunk_x: r.read_i32()?,
            chunk_z: r.read_i32()?,
        })
    }
}

wire_enum! {
    pub enum GameStateReason {
        NoRespawnBlockAvailable = 0,
        EndRaining = 1,
        BeginRaining = 2,
        ChangeGamemode = 3,
        WinGame = 4,
        DemoEvent = 5,
        ArrowHitPlayer = 6,
        RainLevelChange = 7,
        ThunderLevelChange = 8,
        PufferfishSting = 9,
        ElderGuardianAppearance = 10,
        EnableRespawnScreen = 11,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeGameState {
    pub reason: GameStateReason,
    pub value: f32,
}

impl Packet for ChangeGameState {
    const ID: i32 = 0x1E;
    const NAME: &'static str = "ChangeGameState";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8_enum(self.reason).write_f32(self.value);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            reason: r.read_u8_enum()?,
            value: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBlockEntity {
    /// Section relative x in the high nibble, z in the low nibble
    pub packed_xz: u8,
    pub y: i16,
    pub block_entity_type: i32,
    pub data: Option<Compound>,
}

impl ChunkBlockEntity {
    pub fn x(&self) -> u8 {
        self.packed_xz >> 4
    }

    pub fn z(&self) -> u8 {
        self.packed_xz & 0x0F
    }
}

/// Sky and block light for a column of sections.
///
/// Bit `n` of a mask refers to section `n`, counting from one below the
/// bottom of the world.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LightData {
    pub trust_edges: bool,
    pub sky_light_mask: Vec<i64>,
    pub block_light_mask: Vec<i64>,
    pub empty_sky_light_mask: Vec<i64>,
    pub empty_block_light_mask: Vec<i64>,
    pub sky_light: Vec<Bytes>,
    pub block_light: Vec<Bytes>,
}

impl LightData {
    fn write(&self, w: &mut PacketWriter) {
        let write_array = |w: &mut PacketWriter, array: &Bytes| {
            w.write_byte_array(array);
        };
        w.write_bool(self.trust_edges)
            .write_long_array(&self.sky_light_mask)
            .write_long_array(&self.block_light_mask)
            .write_long_array(&self.empty_sky_light_mask)
            .write_long_array(&self.empty_block_light_mask)
            .write_list(&self.sky_light, write_array)
            .write_list(&self.block_light, write_array);
    }

    fn read(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            trust_edges: r.read_bool()?,
            sky_light_mask: r.read_long_array()?,
            block_light_mask: r.read_long_array()?,
            empty_sky_light_mask: r.read_long_array()?,
            empty_block_light_mask: r.read_long_array()?,
            sky_light: r.read_list(|r| read_light_array(r, "sky_light"))?,
            block_light: r.read_list(|r| read_light_array(r, "block_light"))?,
        })
    }
}

fn read_light_array(r: &mut PacketReader, field: &'static str) -> Result<Bytes, DecodeError> {
    let array = r.read_byte_array()?;
    if array.len() != LIGHT_ARRAY_LEN {
        return Err(DecodeError::invalid(
            field,
            format!("expected {} bytes, got {}", LIGHT_ARRAY_LEN, array.len()),
        ));
    }
    Ok(array)
}

/// Full chunk column with its light.
///
/// Section data is kept as the raw paletted container bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDataAndUpdateLight {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub heightmaps: Compound,
    pub data: Bytes,
    pub block_entities: Vec<ChunkBlockEntity>,
    pub light: LightData,
}

impl Packet for ChunkDataAndUpdateLight {
    const ID: i32 = 0x22;
    const NAME: &'static str = "ChunkDataAndUpdateLight";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.chunk_x)
            .write_i32(self.chunk_z)
            .write_compound(&self.heightmaps)
            .write_byte_array(&self.data)
            .write_list(&self.block_entities, |w, entity| {
                w.write_u8(entity.packed_xz)
                    .write_i16(entity.y)
                    .write_var_int(entity.block_entity_type)
                    .write_optional_compound(entity.data.as_ref());
            });
        self.light.write(w);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            chunk_x: r.read_i32()?,
            chunk_z: r.read_i32()?,
            heightmaps: r.read_compound()?,
            data: r.read_byte_array()?,
            block_entities: r.read_list(|r| {
                Ok(ChunkBlockEntity {
                    packed_xz: r.read_u8()?,
                    y: r.read_i16()?,
                    block_entity_type: r.read_var_int()?,
                    data: r.read_optional_compound()?,
                })
            })?,
            light: LightData::read(r)?,
        })
    }
}

/// Sound or particle effect at a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub effect_id: i32,
    pub location: BlockPosition,
    pub data: i32,
    pub disable_relative_volume: bool,
}

impl Packet for Effect {
    const ID: i32 = 0x23;
    const NAME: &'static str = "Effect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.effect_id)
            .write_block_position(&self.location)
            .write_i32(self.data)
            .write_bool(self.disable_relative_volume);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            effect_id: r.read_i32()?,
            location: r.read_block_position()?,
            data: r.read_i32()?,
            disable_relative_volume: r.read_bool()?,
        })
    }
}

/// Particle burst; the particle specific trailer is kept undecoded
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub particle_id: i32,
    pub long_distance: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub particle_data: f32,
    pub count: i32,
    pub data: Bytes,
}

impl Packet for Particle {
    const ID: i32 = 0x24;
    const NAME: &'static str = "Particle";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.particle_id)
            .write_bool(self.long_distance)
            .write_f64(self.x)
            .write_f64(self.y)
            .write_f64(self.z)
            .write_f32(self.offset_x)
            .write_f32(self.offset_y)
            .write_f32(self.offset_z)
            .write_f32(self.particle_data)
            .write_i32(self.count)
            .write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            particle_id: r.read_i32()?,
            long_distance: r.read_bool()?,
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            offset_x: r.read_f32()?,
            offset_y: r.read_f32()?,
            offset_z: r.read_f32()?,
            particle_data: r.read_f32()?,
            count: r.read_i32()?,
            data: r.read_remaining(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLight {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub light: LightData,
}

impl Packet for UpdateLight {
    const ID: i32 = 0x25;
    const NAME: &'static str = "UpdateLight";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.chunk_x).write_var_int(self.chunk_z);
        self.light.write(w);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            chunk_x: r.read_var_int()?,
            chunk_z: r.read_var_int()?,
            light: LightData::read(r)?,
        })
    }
}

/// Section coordinates of a [`MultiBlockChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SectionPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// x in the top 22 bits, z in the next 22, y in the low 20
    pub fn to_packed(&self) -> i64 {
        ((i64::from(self.x) & 0x3F_FFFF) << 42)
            | ((i64::from(self.z) & 0x3F_FFFF) << 20)
            | (i64::from(self.y) & 0xF_FFFF)
    }

    pub fn from_packed(packed: i64) -> Self {
        Self {
            x: (packed >> 42) as i32,
            y: ((packed << 44) >> 44) as i32,
            z: ((packed << 22) >> 42) as i32,
        }
    }
}

/// One block of a [`MultiBlockChange`], coordinates relative to the section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChangeRecord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub block_id: i32,
}

impl BlockChangeRecord {
    fn to_packed(self) -> i64 {
        (i64::from(self.block_id) << 12)
            | (i64::from(self.x & 0xF) << 8)
            | (i64::from(self.z & 0xF) << 4)
            | i64::from(self.y & 0xF)
    }

    fn from_packed(packed: i64) -> Self {
        Self {
            x: ((packed >> 8) & 0xF) as u8,
            y: (packed & 0xF) as u8,
            z: ((packed >> 4) & 0xF) as u8,
            block_id: (packed >> 12) as i32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiBlockChange {
    pub section: SectionPosition,
    /// Inverse of the trust edges flag of [`UpdateLight`]
    pub suppress_light_updates: bool,
    pub records: Vec<BlockChangeRecord>,
}

impl Packet for MultiBlockChange {
    const ID: i32 = 0x3F;
    const NAME: &'static str = "MultiBlockChange";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.section.to_packed())
            .write_bool(self.suppress_light_updates)
            .write_list(&self.records, |w, record| {
                w.write_var_long(record.to_packed());
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            section: SectionPosition::from_packed(r.read_i64()?),
            suppress_light_updates: r.read_bool()?,
            records: r.read_list(|r| Ok(BlockChangeRecord::from_packed(r.read_var_long()?)))?,
        })
    }
}

/// Chunk the player is in, used to pick which chunks to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateViewPosition {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

impl Packet for UpdateViewPosition {
    const ID: i32 = 0x49;
    const NAME: &'static str = "UpdateViewPosition";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.chunk_x).write_var_int(self.chunk_z);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            chunk_x: r.read_var_int()?,
            chunk_z: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateViewDistance {
    pub view_distance: i32,
}

impl Packet for UpdateViewDistance {
    const ID: i32 = 0x4A;
    const NAME: &'static str = "UpdateViewDistance";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.view_distance);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            view_distance: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSimulationDistance {
    pub simulation_distance: i32,
}

impl Packet for UpdateSimulationDistance {
    const ID: i32 = 0x57;
    const NAME: &'static str = "UpdateSimulationDistance";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.simulation_distance);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            simulation_distance: r.read_var_int()?,
        })
    }
}

/// World spawn, where compasses point
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPosition {
    pub location: BlockPosition,
    pub angle: f32,
}

impl Packet for SpawnPosition {
    const ID: i32 = 0x4B;
    const NAME: &'static str = "SpawnPosition";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location).write_f32(self.angle);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
            angle: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeUpdate {
    pub world_age: i64,
    /// Negative when the daylight cycle is frozen
    pub time_of_day: i64,
}

impl Packet for TimeUpdate {
    const ID: i32 = 0x59;
    const NAME: &'static str = "TimeUpdate";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.world_age).write_i64(self.time_of_day);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            world_age: r.read_i64()?,
            time_of_day: r.read_i64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::nbt::Tag;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    // ==========================================================================
    // Multi block change
    // ==========================================================================

    #[test_case(0, 0, 0 ; "origin")]
    #[test_case(-1, -4, -1 ; "negative")]
    #[test_case(1_875_000, 19, -1_875_000 ; "world edge")]
    fn test_section_position_packing(x: i32, y: i32, z: i32) {
        let section = SectionPosition::new(x, y, z);
        assert_eq!(SectionPosition::from_packed(section.to_packed()), section);
    }

    #[test]
    fn test_multi_block_change_records_are_var_longs() {
        let packet = MultiBlockChange {
            section: SectionPosition::new(1, 2, 3),
            suppress_light_updates: true,
            records: vec![BlockChangeRecord {
                x: 15,
                y: 1,
                z: 2,
                block_id: 9,
            }],
        };
        let bytes = encode(&packet);
        // (9 << 12) | (15 << 8) | (2 << 4) | 1 = 0x9F21
        assert_eq!(&bytes[8..], &[0x01, 0x01, 0xA1, 0xBE, 0x02]);
        assert_eq!(decode::<MultiBlockChange>(&bytes).unwrap(), packet);
    }

    // ==========================================================================
    // Chunks and light
    // ==========================================================================

    #[test]
    fn test_chunk_data_reencodes() {
        let packet = ChunkDataAndUpdateLight {
            chunk_x: -3,
            chunk_z: 7,
            heightmaps: Compound::new().with("MOTION_BLOCKING", Tag::LongArray(vec![1, 2, 3])),
            data: Bytes::from_static(&[0, 1, 2, 3]),
            block_entities: vec![ChunkBlockEntity {
                packed_xz: 0x3A,
                y: -12,
                block_entity_type: 7,
                data: None,
            }],
            light: LightData {
                trust_edges: true,
                sky_light_mask: vec![0b10],
                sky_light: vec![Bytes::from(vec![0xFF; LIGHT_ARRAY_LEN])],
                ..LightData::default()
            },
        };
        let decoded = reencode(&packet);
        assert_eq!(decoded.block_entities[0].x(), 3);
        assert_eq!(decoded.block_entities[0].z(), 10);
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_short_light_array_is_rejected() {
        let packet = UpdateLight {
            chunk_x: 0,
            chunk_z: 0,
            light: LightData {
                block_light: vec![Bytes::from_static(&[0; 16])],
                ..LightData::default()
            },
        };
        let err = decode::<UpdateLight>(&encode(&packet)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidField {
                field: "block_light",
                ..
            }
        ));
    }

    // ==========================================================================
    // Misc
    // ==========================================================================

    #[test]
    fn test_vibration_to_entity() {
        let packet = SculkVibrationSignal {
            source: BlockPosition::new(1, 2, 3),
            destination: VibrationDestination::Entity(77),
            arrival_ticks: 20,
        };
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_explosion_records() {
        let packet = Explosion {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            strength: 4.0,
            records: vec![ExplosionRecord { x: -1, y: 0, z: 1 }],
            player_motion_x: 0.0,
            player_motion_y: 0.5,
            player_motion_z: 0.0,
        };
        let bytes = encode(&packet);
        assert_eq!(bytes.len(), 16 + 1 + 3 + 12);
        assert_eq!(reencode(&packet), packet);
    }
}
