//! Entity spawning, movement and state.

use bytes::Bytes;
use uuid::Uuid;

use crate::protocol::io::{PacketReader, PacketWriter, WireEnum};
use crate::protocol::item::ItemStack;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{BlockPosition, CardinalDirection, Direction, Identifier, Position, Velocity};

/// Non-living entity such as a minecart or projectile
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnEntity {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub entity_type: i32,
    pub position: Position,
    pub direction: Direction,
    /// Type specific value, e.g. the shooter of an arrow
    pub data: i32,
    pub velocity: Velocity,
}

impl Packet for SpawnEntity {
    const ID: i32 = 0x00;
    const NAME: &'static str = "SpawnEntity";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_uuid(&self.uuid)
            .write_var_int(self.entity_type)
            .write_position(&self.position)
            .write_direction(&self.direction)
            .write_i32(self.data)
            .write_velocity(&self.velocity);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            uuid: r.read_uuid()?,
            entity_type: r.read_var_int()?,
            position: r.read_position()?,
            direction: r.read_direction()?,
            data: r.read_i32()?,
            velocity: r.read_velocity()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnExperienceOrb {
    pub entity_id: i32,
    pub position: Position,
    pub count: i16,
}

impl Packet for SpawnExperienceOrb {
    const ID: i32 = 0x01;
    const NAME: &'static str = "SpawnExperienceOrb";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_position(&self.position)
            .write_i16(self.count);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            position: r.read_position()?,
            count: r.read_i16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnLivingEntity {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub entity_type: i32,
    pub position: Position,
    pub direction: Direction,
    pub head_pitch: i8,
    pub velocity: Velocity,
}

impl Packet for SpawnLivingEntity {
    const ID: i32 = 0x02;
    const NAME: &'static str = "SpawnLivingEntity";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_uuid(&self.uuid)
            .write_var_int(self.entity_type)
            .write_position(&self.position)
            .write_yaw_pitch(&self.direction)
            .write_i8(self.head_pitch)
            .write_velocity(&self.velocity);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            uuid: r.read_uuid()?,
            entity_type: r.read_var_int()?,
            position: r.read_position()?,
            direction: r.read_yaw_pitch()?,
            head_pitch: r.read_i8()?,
            velocity: r.read_velocity()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPainting {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub motive: i32,
    pub location: BlockPosition,
    pub direction: CardinalDirection,
}

impl Packet for SpawnPainting {
    const ID: i32 = 0x03;
    const NAME: &'static str = "SpawnPainting";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_uuid(&self.uuid)
            .write_var_int(self.motive)
            .write_block_position(&self.location)
            .write_u8_enum(self.direction);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            uuid: r.read_uuid()?,
            motive: r.read_var_int()?,
            location: r.read_block_position()?,
            direction: r.read_u8_enum()?,
        })
    }
}

/// Another player coming into view
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlayer {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub position: Position,
    pub direction: Direction,
}

impl Packet for SpawnPlayer {
    const ID: i32 = 0x04;
    const NAME: &'static str = "SpawnPlayer";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_uuid(&self.uuid)
            .write_position(&self.position)
            .write_yaw_pitch(&self.direction);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            uuid: r.read_uuid()?,
            position: r.read_position()?,
            direction: r.read_yaw_pitch()?,
        })
    }
}

wire_enum! {
    pub enum Animation {
        SwingMainArm = 0,
        TakeDamage = 1,
        LeaveBed = 2,
        SwingOffhand = 3,
        CriticalEffect = 4,
        MagicCriticalEffect = 5,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityAnimation {
    pub entity_id: i32,
    pub animation: Animation,
}

impl Packet for EntityAnimation {
    const ID: i32 = 0x06;
    const NAME: &'static str = "EntityAnimation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_u8_enum(self.animation);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            animation: r.read_u8_enum()?,
        })
    }
}

/// Entity event such as a death animation or a totem
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStatus {
    pub entity_id: i32,
    pub status: i8,
}

impl Packet for EntityStatus {
    const ID: i32 = 0x1B;
    const NAME: &'static str = "EntityStatus";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.entity_id).write_i8(self.status);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_i32()?,
            status: r.read_i8()?,
        })
    }
}

/// Relative move; deltas are `(current * 32 - previous * 32) * 128`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPosition {
    pub entity_id: i32,
    pub delta_x: i16,
    pub delta_y: i16,
    pub delta_z: i16,
    pub on_ground: bool,
}

impl Packet for EntityPosition {
    const ID: i32 = 0x29;
    const NAME: &'static str = "EntityPosition";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_i16(self.delta_x)
            .write_i16(self.delta_y)
            .write_i16(self.delta_z)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            delta_x: r.read_i16()?,
            delta_y: r.read_i16()?,
            delta_z: r.read_i16()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityPositionAndRotation {
    pub entity_id: i32,
    pub delta_x: i16,
    pub delta_y: i16,
    pub delta_z: i16,
    pub direction: Direction,
    pub on_ground: bool,
}

impl Packet for EntityPositionAndRotation {
    const ID: i32 = 0x2A;
    const NAME: &'static str = "EntityPositionAndRotation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_i16(self.delta_x)
            .write_i16(self.delta_y)
            .write_i16(self.delta_z)
            .write_yaw_pitch(&self.direction)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            delta_x: r.read_i16()?,
            delta_y: r.read_i16()?,
            delta_z: r.read_i16()?,
            direction: r.read_yaw_pitch()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRotation {
    pub entity_id: i32,
    pub direction: Direction,
    pub on_ground: bool,
}

impl Packet for EntityRotation {
    const ID: i32 = 0x2B;
    const NAME: &'static str = "EntityRotation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_yaw_pitch(&self.direction)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            direction: r.read_yaw_pitch()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityHeadLook {
    pub entity_id: i32,
    pub head_yaw: i8,
}

impl Packet for EntityHeadLook {
    const ID: i32 = 0x3E;
    const NAME: &'static str = "EntityHeadLook";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id).write_i8(self.head_yaw);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            head_yaw: r.read_i8()?,
        })
    }
}

/// Absolute move, used when a relative move would overflow
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTeleport {
    pub entity_id: i32,
    pub position: Position,
    pub direction: Direction,
    pub on_ground: bool,
}

impl Packet for EntityTeleport {
    const ID: i32 = 0x62;
    const NAME: &'static str = "EntityTeleport";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_position(&self.position)
            .write_yaw_pitch(&self.direction)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            position: r.read_position()?,
            direction: r.read_yaw_pitch()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityVelocity {
    pub entity_id: i32,
    pub velocity: Velocity,
}

impl Packet for EntityVelocity {
    const ID: i32 = 0x4F;
    const NAME: &'static str = "EntityVelocity";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_velocity(&self.velocity);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            velocity: r.read_velocity()?,
        })
    }
}

/// Entity metadata; the entry list is kept undecoded
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    pub entity_id: i32,
    pub metadata: Bytes,
}

impl Packet for EntityMetadata {
    const ID: i32 = 0x4D;
    const NAME: &'static str = "EntityMetadata";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id).write_bytes(&self.metadata);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            metadata: r.read_remaining(),
        })
    }
}

wire_enum! {
    pub enum EquipmentSlot {
        MainHand = 0,
        OffHand = 1,
        Boots = 2,
        Leggings = 3,
        Chestplate = 4,
        Helmet = 5,
    }
}

const EQUIPMENT_CONTINUES: u8 = 0x80;

/// Visible equipment of an entity.
///
/// Each slot byte has its top bit set when another entry follows, so the
/// list is never empty on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEquipment {
    pub entity_id: i32,
    pub equipment: Vec<(EquipmentSlot, Option<ItemStack>)>,
}

impl Packet for EntityEquipment {
    const ID: i32 = 0x50;
    const NAME: &'static str = "EntityEquipment";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id);
        let last = self.equipment.len().saturating_sub(1);
        for (index, (slot, item)) in self.equipment.iter().enumerate() {
            let mut slot_byte = slot.id() as u8;
            if index < last {
                slot_byte |= EQUIPMENT_CONTINUES;
            }
            w.write_u8(slot_byte).write_slot(item.as_ref());
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let entity_id = r.read_var_int()?;
        let mut equipment = Vec::new();
        loop {
            let slot_byte = r.read_u8()?;
            let slot_id = i32::from(slot_byte & !EQUIPMENT_CONTINUES);
            let slot = EquipmentSlot::from_id(slot_id).ok_or(DecodeError::UnknownEnumId {
                kind: EquipmentSlot::KIND,
                id: slot_id,
            })?;
            equipment.push((slot, r.read_slot()?));
            if slot_byte & EQUIPMENT_CONTINUES == 0 {
                break;
            }
        }
        Ok(Self {
            entity_id,
            equipment,
        })
    }
}

wire_enum! {
    pub enum ModifierOperation {
        Add = 0,
        AddPercent = 1,
        Multiply = 2,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    pub uuid: Uuid,
    pub amount: f64,
    pub operation: ModifierOperation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: Identifier,
    pub value: f64,
    pub modifiers: Vec<AttributeModifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperties {
    pub entity_id: i32,
    pub properties: Vec<Attribute>,
}

impl Packet for EntityProperties {
    const ID: i32 = 0x64;
    const NAME: &'static str = "EntityProperties";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_list(&self.properties, |w, attribute| {
                w.write_identifier(&attribute.key)
                    .write_f64(attribute.value)
                    .write_list(&attribute.modifiers, |w, modifier| {
                        w.write_uuid(&modifier.uuid)
                            .write_f64(modifier.amount)
                            .write_i8_enum(modifier.operation);
                    });
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            properties: r.read_list(|r| {
                Ok(Attribute {
                    key: r.read_identifier()?,
                    value: r.read_f64()?,
                    modifiers: r.read_list(|r| {
                        Ok(AttributeModifier {
                            uuid: r.read_uuid()?,
                            amount: r.read_f64()?,
                            operation: r.read_i8_enum()?,
                        })
                    })?,
                })
            })?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityEffect {
    pub entity_id: i32,
    pub effect_id: i8,
    pub amplifier: i8,
    pub duration: i32,
    /// Bit 0x01 ambient, 0x02 show particles, 0x04 show icon
    pub flags: i8,
}

impl Packet for EntityEffect {
    const ID: i32 = 0x65;
    const NAME: &'static str = "EntityEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_i8(self.effect_id)
            .write_i8(self.amplifier)
            .write_var_int(self.duration)
            .write_i8(self.flags);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            effect_id: r.read_i8()?,
            amplifier: r.read_i8()?,
            duration: r.read_var_int()?,
            flags: r.read_i8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveEntityEffect {
    pub entity_id: i32,
    pub effect_id: i8,
}

impl Packet for RemoveEntityEffect {
    const ID: i32 = 0x3B;
    const NAME: &'static str = "RemoveEntityEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id).write_i8(self.effect_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            effect_id: r.read_i8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestroyEntities {
    pub entity_ids: Vec<i32>,
}

impl Packet for DestroyEntities {
    const ID: i32 = 0x3A;
    const NAME: &'static str = "DestroyEntities";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int_array(&self.entity_ids);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_ids: r.read_var_int_array()?,
        })
    }
}

/// Leash link; a holder of -1 detaches
#[derive(Debug, Clone, PartialEq)]
pub struct AttachEntity {
    pub attached_entity_id: i32,
    pub holding_entity_id: i32,
}

impl Packet for AttachEntity {
    const ID: i32 = 0x4E;
    const NAME: &'static str = "AttachEntity";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.attached_entity_id)
            .write_i32(self.holding_entity_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            attached_entity_id: r.read_i32()?,
            holding_entity_id: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetPassengers {
    pub entity_id: i32,
    pub passengers: Vec<i32>,
}

impl Packet for SetPassengers {
    const ID: i32 = 0x54;
    const NAME: &'static str = "SetPassengers";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_var_int_array(&self.passengers);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            passengers: r.read_var_int_array()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectItem {
    pub collected_entity_id: i32,
    pub collector_entity_id: i32,
    pub count: i32,
}

impl Packet for CollectItem {
    const ID: i32 = 0x61;
    const NAME: &'static str = "CollectItem";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.collected_entity_id)
            .write_var_int(self.collector_entity_id)
            .write_var_int(self.count);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            collected_entity_id: r.read_var_int()?,
            collector_entity_id: r.read_var_int()?,
            count: r.read_var_int()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equipment_continuation_bits() {
        let packet = EntityEquipment {
            entity_id: 5,
            equipment: vec![
                (EquipmentSlot::MainHand, Some(ItemStack::new(1, 1))),
                (EquipmentSlot::Helmet, None),
            ],
        };
        let bytes = encode(&packet);
        assert_eq!(bytes, vec![0x05, 0x80, 0x01, 0x01, 0x01, 0x00, 0x05, 0x00]);
        assert_eq!(decode::<EntityEquipment>(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_living_entity_rotation_order() {
        let packet = SpawnLivingEntity {
            entity_id: 1,
            uuid: Uuid::nil(),
            entity_type: 2,
            position: Position::new(0.0, 64.0, 0.0),
            direction: Direction::new(10, 20),
            head_pitch: 30,
            velocity: Velocity::default(),
        };
        let bytes = encode(&packet);
        // id, uuid, type, three doubles, then yaw, pitch, head pitch
        assert_eq!(&bytes[1 + 16 + 1 + 24..1 + 16 + 1 + 27], &[20, 10, 30]);
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_entity_properties() {
        let packet = EntityProperties {
            entity_id: 9,
            properties: vec![Attribute {
                key: Identifier::parse("generic.movement_speed").unwrap(),
                value: 0.1,
                modifiers: vec![AttributeModifier {
                    uuid: Uuid::from_u128(42),
                    amount: 0.3,
                    operation: ModifierOperation::Multiply,
                }],
            }],
        };
        assert_eq!(reencode(&packet), packet);
    }
}
