//! The player's own state: joining, respawning, position and vitals.

use uuid::Uuid;

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter, WireEnum};
use crate::protocol::item::Property;
use crate::protocol::nbt::Compound;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{Dimension, Gamemode, Identifier, Position};

/// A previous gamemode of -1 means there was none
fn read_previous_gamemode(r: &mut PacketReader) -> Result<Option<Gamemode>, DecodeError> {
    match r.read_i8()? {
        -1 => Ok(None),
        id => Gamemode::from_id(i32::from(id))
            .map(Some)
            .ok_or(DecodeError::UnknownEnumId {
                kind: Gamemode::KIND,
                id: i32::from(id),
            }),
    }
}

fn write_previous_gamemode(w: &mut PacketWriter, gamemode: Option<Gamemode>) {
    w.write_i8(gamemode.map_or(-1, |gamemode| gamemode.id() as i8));
}

/// First play packet, describing the world the player joins.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub entity_id: i32,
    pub is_hardcore: bool,
    pub gamemode: Gamemode,
    pub previous_gamemode: Option<Gamemode>,
    pub dimensions: Vec<Identifier>,
    /// Dimension type and biome registries
    pub dimension_codec: Compound,
    /// Dimension type of the world being joined
    pub dimension_type: Compound,
    pub dimension: Dimension,
    /// First eight bytes of the SHA-256 of the world seed
    pub hashed_seed: i64,
    /// Ignored by vanilla clients
    pub max_players: i32,
    pub view_distance: i32,
    pub simulation_distance: i32,
    pub reduced_debug_info: bool,
    pub enable_respawn_screen: bool,
    pub is_debug: bool,
    pub is_flat: bool,
}

impl Packet for JoinGame {
    const ID: i32 = 0x26;
    const NAME: &'static str = "JoinGame";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.entity_id)
            .write_bool(self.is_hardcore)
            .write_u8_enum(self.gamemode);
        write_previous_gamemode(w, self.previous_gamemode);
        w.write_list(&self.dimensions, |w, dimension| {
            w.write_identifier(dimension);
        })
        .write_compound(&self.dimension_codec)
        .write_compound(&self.dimension_type)
        .write_identifier(self.dimension.identifier())
        .write_i64(self.hashed_seed)
        .write_var_int(self.max_players)
        .write_var_int(self.view_distance)
        .write_var_int(self.simulation_distance)
        .write_bool(self.reduced_debug_info)
        .write_bool(self.enable_respawn_screen)
        .write_bool(self.is_debug)
        .write_bool(self.is_flat);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_i32()?,
            is_hardcore: r.read_bool()?,
            gamemode: r.read_u8_enum()?,
            previous_gamemode: read_previous_gamemode(r)?,
            dimensions: r.read_list(|r| r.read_identifier())?,
            dimension_codec: r.read_compound()?,
            dimension_type: r.read_compound()?,
            dimension: Dimension::new(r.read_identifier()?),
            hashed_seed: r.read_i64()?,
            max_players: r.read_var_int()?,
            view_distance: r.read_var_int()?,
            simulation_distance: r.read_var_int()?,
            reduced_debug_info: r.read_bool()?,
            enable_respawn_screen: r.read_bool()?,
            is_debug: r.read_bool()?,
            is_flat: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Respawn {
    pub dimension_type: Compound,
    pub dimension: Dimension,
    pub hashed_seed: i64,
    pub gamemode: Gamemode,
    pub previous_gamemode: Option<Gamemode>,
    pub is_debug: bool,
    pub is_flat: bool,
    /// Keep attributes and metadata, false after death
    pub copy_metadata: bool,
}

impl Packet for Respawn {
    const ID: i32 = 0x3D;
    const NAME: &'static str = "Respawn";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_compound(&self.dimension_type)
            .write_identifier(self.dimension.identifier())
            .write_i64(self.hashed_seed)
            .write_u8_enum(self.gamemode);
        write_previous_gamemode(w, self.previous_gamemode);
        w.write_bool(self.is_debug)
            .write_bool(self.is_flat)
            .write_bool(self.copy_metadata);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            dimension_type: r.read_compound()?,
            dimension: Dimension::new(r.read_identifier()?),
            hashed_seed: r.read_i64()?,
            gamemode: r.read_u8_enum()?,
            previous_gamemode: read_previous_gamemode(r)?,
            is_debug: r.read_bool()?,
            is_flat: r.read_bool()?,
            copy_metadata: r.read_bool()?,
        })
    }
}

/// Bits of [`PlayerPositionAndLook::relative`]; a set bit makes the field
/// relative to the current value
pub mod relative {
    pub const X: i8 = 0x01;
    pub const Y: i8 = 0x02;
    pub const Z: i8 = 0x04;
    pub const Y_ROT: i8 = 0x08;
    pub const X_ROT: i8 = 0x10;
}

/// Server side teleport; the client answers with a teleport confirm
/// carrying `teleport_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndLook {
    pub position: Position,
    pub yaw: f32,
    pub pitch: f32,
    pub relative: i8,
    pub teleport_id: i32,
    pub dismount_vehicle: bool,
}

impl PlayerPositionAndLook {
    pub fn is_relative(&self, flag: i8) -> bool {
        self.relative & flag != 0
    }
}

impl Packet for PlayerPositionAndLook {
    const ID: i32 = 0x38;
    const NAME: &'static str = "PlayerPositionAndLook";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_position(&self.position)
            .write_f32(self.yaw)
            .write_f32(self.pitch)
            .write_i8(self.relative)
            .write_var_int(self.teleport_id)
            .write_bool(self.dismount_vehicle);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            position: r.read_position()?,
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
            relative: r.read_i8()?,
            teleport_id: r.read_var_int()?,
            dismount_vehicle: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAbilities {
    /// 0x01 invulnerable, 0x02 flying, 0x04 allow flying, 0x08 creative
    pub flags: i8,
    pub flying_speed: f32,
    pub field_of_view_modifier: f32,
}

impl Packet for PlayerAbilities {
    const ID: i32 = 0x32;
    const NAME: &'static str = "PlayerAbilities";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.flags)
            .write_f32(self.flying_speed)
            .write_f32(self.field_of_view_modifier);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            flags: r.read_i8()?,
            flying_speed: r.read_f32()?,
            field_of_view_modifier: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHealth {
    /// Zero or less means dead
    pub health: f32,
    pub food: i32,
    pub food_saturation: f32,
}

impl Packet for UpdateHealth {
    const ID: i32 = 0x52;
    const NAME: &'static str = "UpdateHealth";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f32(self.health)
            .write_var_int(self.food)
            .write_f32(self.food_saturation);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            health: r.read_f32()?,
            food: r.read_var_int()?,
            food_saturation: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetExperience {
    /// Progress towards the next level, `0.0..=1.0`
    pub experience_bar: f32,
    pub level: i32,
    pub total_experience: i32,
}

impl Packet for SetExperience {
    const ID: i32 = 0x51;
    const NAME: &'static str = "SetExperience";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f32(self.experience_bar)
            .write_var_int(self.level)
            .write_var_int(self.total_experience);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            experience_bar: r.read_f32_in("experience_bar", 0.0, 1.0)?,
            level: r.read_var_int()?,
            total_experience: r.read_var_int()?,
        })
    }
}

/// Selected hotbar slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItemChange {
    pub slot: i8,
}

impl Packet for HeldItemChange {
    const ID: i32 = 0x48;
    const NAME: &'static str = "HeldItemChange";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.slot);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            slot: r.read_i8_in("slot", 0, 8)?,
        })
    }
}

/// Spectate through another entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    pub camera_id: i32,
}

impl Packet for Camera {
    const ID: i32 = 0x47;
    const NAME: &'static str = "Camera";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.camera_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            camera_id: r.read_var_int()?,
        })
    }
}

wire_enum! {
    pub enum AnchorPoint {
        Feet = 0,
        Eyes = 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceEntity {
    pub entity_id: i32,
    pub anchor: AnchorPoint,
}

/// Rotate the player to look at a point or an entity
#[derive(Debug, Clone, PartialEq)]
pub struct FacePlayer {
    pub anchor: AnchorPoint,
    pub target: Position,
    pub entity: Option<FaceEntity>,
}

impl Packet for FacePlayer {
    const ID: i32 = 0x37;
    const NAME: &'static str = "FacePlayer";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.anchor)
            .write_position(&self.target)
            .write_option(self.entity, |w, entity| {
                w.write_var_int(entity.entity_id).write_enum(entity.anchor);
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            anchor: r.read_enum()?,
            target: r.read_position()?,
            entity: r.read_option(|r| {
                Ok(FaceEntity {
                    entity_id: r.read_var_int()?,
                    anchor: r.read_enum()?,
                })
            })?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndCombatEvent {
    pub duration: i32,
    pub entity_id: i32,
}

impl Packet for EndCombatEvent {
    const ID: i32 = 0x33;
    const NAME: &'static str = "EndCombatEvent";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.duration).write_i32(self.entity_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            duration: r.read_var_int()?,
            entity_id: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterCombatEvent;

impl Packet for EnterCombatEvent {
    const ID: i32 = 0x34;
    const NAME: &'static str = "EnterCombatEvent";

    fn encode(&self, _w: &mut PacketWriter) {}

    fn decode(_r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

/// Player death, opens the death screen
#[derive(Debug, Clone, PartialEq)]
pub struct DeathCombatEvent {
    pub player_id: i32,
    /// Killer, or -1
    pub entity_id: i32,
    pub message: Component,
}

impl Packet for DeathCombatEvent {
    const ID: i32 = 0x35;
    const NAME: &'static str = "DeathCombatEvent";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.player_id)
            .write_i32(self.entity_id)
            .write_component(&self.message);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            player_id: r.read_var_int()?,
            entity_id: r.read_i32()?,
            message: r.read_component()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistic {
    pub category_id: i32,
    pub statistic_id: i32,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub statistics: Vec<Statistic>,
}

impl Packet for Statistics {
    const ID: i32 = 0x07;
    const NAME: &'static str = "Statistics";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_list(&self.statistics, |w, statistic| {
            w.write_var_int(statistic.category_id)
                .write_var_int(statistic.statistic_id)
                .write_var_int(statistic.value);
        });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            statistics: r.read_list(|r| {
                Ok(Statistic {
                    category_id: r.read_var_int()?,
                    statistic_id: r.read_var_int()?,
                    value: r.read_var_int()?,
                })
            })?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPlayer {
    pub uuid: Uuid,
    pub name: String,
    pub properties: Vec<Property>,
    pub gamemode: Gamemode,
    /// Round trip time in milliseconds
    pub ping: i32,
    pub display_name: Option<Component>,
}

/// Tab list update.
///
/// One action type applies to every entry in the packet, so each variant
/// carries its own entry list.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInfo {
    AddPlayer(Vec<AddPlayer>),
    UpdateGamemode(Vec<(Uuid, Gamemode)>),
    UpdateLatency(Vec<(Uuid, i32)>),
    UpdateDisplayName(Vec<(Uuid, Option<Component>)>),
    RemovePlayer(Vec<Uuid>),
}

impl PlayerInfo {
    fn action_id(&self) -> i32 {
        match self {
            PlayerInfo::AddPlayer(_) => 0,
            PlayerInfo::UpdateGamemode(_) => 1,
            PlayerInfo::UpdateLatency(_) => 2,
            PlayerInfo::UpdateDisplayName(_) => 3,
            PlayerInfo::RemovePlayer(_) => 4,
        }
    }
}

impl Packet for PlayerInfo {
    const ID: i32 = 0x36;
    const NAME: &'static str = "PlayerInfo";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.action_id());
        match self {
            PlayerInfo::AddPlayer(players) => {
                w.write_list(players, |w, player| {
                    w.write_uuid(&player.uuid)
                        .write_string(&player.name)
                        .write_list(&player.properties, |w, property| {
                            w.write_property(property);
                        })
                        .write_enum(player.gamemode)
                        .write_var_int(player.ping)
                        .write_option(player.display_name.as_ref(), |w, name| {
                            w.write_component(name);
                        });
                });
            }
            PlayerInfo::UpdateGamemode(players) => {
                w.write_list(players, |w, (uuid, gamemode)| {
                    w.write_uuid(uuid).write_enum(*gamemode);
                });
            }
            PlayerInfo::UpdateLatency(players) => {
                w.write_list(players, |w, (uuid, ping)| {
                    w.write_uuid(uuid).write_var_int(*ping);
                });
            }
            PlayerInfo::UpdateDisplayName(players) => {
                w.write_list(players, |w, (uuid, name)| {
                    w.write_uuid(uuid).write_option(name.as_ref(), |w, name| {
                        w.write_component(name);
                    });
                });
            }
            PlayerInfo::RemovePlayer(players) => {
                w.write_list(players, |w, uuid| {
                    w.write_uuid(uuid);
                });
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let action = r.read_var_int()?;
        let info = match action {
            0 => PlayerInfo::AddPlayer(r.read_list(|r| {
                Ok(AddPlayer {
                    uuid: r.read_uuid()?,
                    name: r.read_string(16)?,
                    properties: r.read_list(|r| r.read_property())?,
                    gamemode: r.read_enum()?,
                    ping: r.read_var_int()?,
                    display_name: r.read_option(|r| r.read_component())?,
                })
            })?),
            1 => PlayerInfo::UpdateGamemode(
                r.read_list(|r| Ok((r.read_uuid()?, r.read_enum()?)))?,
            ),
            2 => PlayerInfo::UpdateLatency(r.read_list(|r| Ok((r.read_uuid()?, r.read_var_int()?)))?),
            3 => PlayerInfo::UpdateDisplayName(r.read_list(|r| {
                Ok((r.read_uuid()?, r.read_option(|r| r.read_component())?))
            })?),
            4 => PlayerInfo::RemovePlayer(r.read_list(|r| r.read_uuid())?),
            id => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "PlayerInfoAction",
                    id,
                })
            }
        };
        Ok(info)
    }
}
