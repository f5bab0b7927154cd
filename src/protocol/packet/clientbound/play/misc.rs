//! Keep alive, plugin channels, maps, tags and the remaining odds and ends.

use bytes::Bytes;

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{BlockPosition, Identifier};

/// Liveness check; the client must echo `id` or get kicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAlive {
    pub id: i64,
}

impl Packet for KeepAlive {
    const ID: i32 = 0x21;
    const NAME: &'static str = "KeepAlive";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i64(self.id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self { id: r.read_i64()? })
    }
}

/// Answered with a serverbound pong carrying the same id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub id: i32,
}

impl Packet for Ping {
    const ID: i32 = 0x30;
    const NAME: &'static str = "Ping";

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
    const ID: i32 = 0x18;
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

#[derive(Debug, Clone, PartialEq)]
pub struct MapIcon {
    pub icon_type: i32,
    pub x: i8,
    pub z: i8,
    /// 0..=15, in steps of 22.5 degrees
    pub direction: i8,
    pub display_name: Option<Component>,
}

/// Rectangle of updated map pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPatch {
    pub columns: u8,
    pub rows: u8,
    pub x: u8,
    pub z: u8,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub map_id: i32,
    pub scale: i8,
    pub locked: bool,
    /// `None` when the map does not track positions
    pub icons: Option<Vec<MapIcon>>,
    pub patch: Option<MapPatch>,
}

impl Packet for MapData {
    const ID: i32 = 0x27;
    const NAME: &'static str = "MapData";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.map_id)
            .write_i8(self.scale)
            .write_bool(self.locked)
            .write_option(self.icons.as_ref(), |w, icons| {
                w.write_list(icons, |w, icon| {
                    w.write_var_int(icon.icon_type)
                        .write_i8(icon.x)
                        .write_i8(icon.z)
                        .write_i8(icon.direction)
                        .write_option(icon.display_name.as_ref(), |w, name| {
                            w.write_component(name);
                        });
                });
            });
        match &self.patch {
            Some(patch) if patch.columns > 0 => {
                w.write_u8(patch.columns)
                    .write_u8(patch.rows)
                    .write_u8(patch.x)
                    .write_u8(patch.z)
                    .write_byte_array(&patch.data);
            }
            _ => {
                w.write_u8(0);
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let map_id = r.read_var_int()?;
        let scale = r.read_i8()?;
        let locked = r.read_bool()?;
        let icons = r.read_option(|r| {
            r.read_list(|r| {
                Ok(MapIcon {
                    icon_type: r.read_var_int()?,
                    x: r.read_i8()?,
                    z: r.read_i8()?,
                    direction: r.read_i8_in("direction", 0, 15)?,
                    display_name: r.read_option(|r| r.read_component())?,
                })
            })
        })?;
        let columns = r.read_u8()?;
        let patch = if columns > 0 {
            Some(MapPatch {
                columns,
                rows: r.read_u8()?,
                x: r.read_u8()?,
                z: r.read_u8()?,
                data: r.read_byte_array()?,
            })
        } else {
            None
        };
        Ok(Self {
            map_id,
            scale,
            locked,
            icons,
            patch,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMove {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Packet for VehicleMove {
    const ID: i32 = 0x2C;
    const NAME: &'static str = "VehicleMove";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f64(self.x)
            .write_f64(self.y)
            .write_f64(self.z)
            .write_f32(self.yaw)
            .write_f32(self.pitch);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSignEditor {
    pub location: BlockPosition,
}

impl Packet for OpenSignEditor {
    const ID: i32 = 0x2F;
    const NAME: &'static str = "OpenSignEditor";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_block_position(&self.location);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            location: r.read_block_position()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePackSend {
    pub url: String,
    /// Hex SHA-1 of the pack, at most 40 characters
    pub hash: String,
    pub forced: bool,
    pub prompt_message: Option<Component>,
}

impl Packet for ResourcePackSend {
    const ID: i32 = 0x3C;
    const NAME: &'static str = "ResourcePackSend";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.url)
            .write_string(&self.hash)
            .write_bool(self.forced)
            .write_option(self.prompt_message.as_ref(), |w, message| {
                w.write_component(message);
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            url: r.read_string(32_767)?,
            hash: r.read_string(40)?,
            forced: r.read_bool()?,
            prompt_message: r.read_option(|r| r.read_component())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAdvancementTab {
    pub tab: Option<Identifier>,
}

impl Packet for SelectAdvancementTab {
    const ID: i32 = 0x40;
    const NAME: &'static str = "SelectAdvancementTab";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_option(self.tab.as_ref(), |w, tab| {
            w.write_identifier(tab);
        });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            tab: r.read_option(|r| r.read_identifier())?,
        })
    }
}

/// Advancement tree and progress, kept undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advancements {
    pub data: Bytes,
}

impl Packet for Advancements {
    const ID: i32 = 0x63;
    const NAME: &'static str = "Advancements";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            data: r.read_remaining(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: Identifier,
    pub entries: Vec<i32>,
}

/// Tags of one registry such as `minecraft:block`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRegistry {
    pub registry: Identifier,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags {
    pub registries: Vec<TagRegistry>,
}

impl Packet for Tags {
    const ID: i32 = 0x67;
    const NAME: &'static str = "Tags";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_list(&self.registries, |w, registry| {
            w.write_identifier(&registry.registry)
                .write_list(&registry.tags, |w, tag| {
                    w.write_identifier(&tag.name)
                        .write_var_int_array(&tag.entries);
                });
        });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            registries: r.read_list(|r| {
                Ok(TagRegistry {
                    registry: r.read_identifier()?,
                    tags: r.read_list(|r| {
                        Ok(Tag {
                            name: r.read_identifier()?,
                            entries: r.read_var_int_array()?,
                        })
                    })?,
                })
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_data_without_tracking_or_patch() {
        let packet = MapData {
            map_id: 3,
            scale: 0,
            locked: false,
            icons: None,
            patch: None,
        };
        assert_eq!(encode(&packet), vec![0x03, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_map_data_with_icons_and_patch() {
        let packet = MapData {
            map_id: 1,
            scale: 2,
            locked: true,
            icons: Some(vec![MapIcon {
                icon_type: 0,
                x: -5,
                z: 5,
                direction: 8,
                display_name: Some(Component::text("home")),
            }]),
            patch: Some(MapPatch {
                columns: 2,
                rows: 1,
                x: 10,
                z: 20,
                data: Bytes::from_static(&[4, 5]),
            }),
        };
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_map_icon_direction_range() {
        // id, scale, locked, tracking, one icon with direction 16
        let bytes = [0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00];
        assert!(matches!(
            decode::<MapData>(&bytes),
            Err(DecodeError::InvalidField { field: "direction", .. })
        ));
    }

    #[test]
    fn test_tags() {
        let packet = Tags {
            registries: vec![TagRegistry {
                registry: Identifier::parse("block").unwrap(),
                tags: vec![Tag {
                    name: Identifier::parse("logs").unwrap(),
                    entries: vec![1, 2, 300],
                }],
            }],
        };
        assert_eq!(reencode(&packet), packet);
    }
}
