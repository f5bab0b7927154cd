//! Sounds.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::Identifier;

wire_enum! {
    pub enum SoundCategory {
        Master = 0,
        Music = 1,
        Records = 2,
        Weather = 3,
        Blocks = 4,
        Hostile = 5,
        Neutral = 6,
        Players = 7,
        Ambient = 8,
        Voice = 9,
    }
}

/// Sound positions are fixed point with three fractional bits
pub fn sound_coordinate(block: f64) -> i32 {
    (block * 8.0) as i32
}

/// Sound by resource location, for sounds outside the built in registry
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSoundEffect {
    pub sound: Identifier,
    pub category: SoundCategory,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub volume: f32,
    pub pitch: f32,
}

impl Packet for NamedSoundEffect {
    const ID: i32 = 0x19;
    const NAME: &'static str = "NamedSoundEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_identifier(&self.sound)
            .write_enum(self.category)
            .write_i32(self.x)
            .write_i32(self.y)
            .write_i32(self.z)
            .write_f32(self.volume)
            .write_f32(self.pitch);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            sound: r.read_identifier()?,
            category: r.read_enum()?,
            x: r.read_i32()?,
            y: r.read_i32()?,
            z: r.read_i32()?,
            volume: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySoundEffect {
    pub sound_id: i32,
    pub category: SoundCategory,
    pub entity_id: i32,
    pub volume: f32,
    pub pitch: f32,
}

impl Packet for EntitySoundEffect {
    const ID: i32 = 0x5C;
    const NAME: &'static str = "EntitySoundEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.sound_id)
            .write_enum(self.category)
            .write_var_int(self.entity_id)
            .write_f32(self.volume)
            .write_f32(self.pitch);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            sound_id: r.read_var_int()?,
            category: r.read_enum()?,
            entity_id: r.read_var_int()?,
            volume: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundEffect {
    pub sound_id: i32,
    pub category: SoundCategory,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub volume: f32,
    pub pitch: f32,
}

impl Packet for SoundEffect {
    const ID: i32 = 0x5D;
    const NAME: &'static str = "SoundEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.sound_id)
            .write_enum(self.category)
            .write_i32(self.x)
            .write_i32(self.y)
            .write_i32(self.z)
            .write_f32(self.volume)
            .write_f32(self.pitch);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            sound_id: r.read_var_int()?,
            category: r.read_enum()?,
            x: r.read_i32()?,
            y: r.read_i32()?,
            z: r.read_i32()?,
            volume: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }
}

const STOP_CATEGORY: i8 = 0x01;
const STOP_SOUND: i8 = 0x02;

/// Stops matching sounds; with neither filter set every sound stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSound {
    pub category: Option<SoundCategory>,
    pub sound: Option<Identifier>,
}

impl Packet for StopSound {
    const ID: i32 = 0x5E;
    const NAME: &'static str = "StopSound";

    fn encode(&self, w: &mut PacketWriter) {
        let mut flags = 0;
        if self.category.is_some() {
            flags |= STOP_CATEGORY;
        }
        if self.sound.is_some() {
            flags |= STOP_SOUND;
        }
        w.write_i8(flags);
        if let Some(category) = self.category {
            w.write_enum(category);
        }
        if let Some(sound) = &self.sound {
            w.write_identifier(sound);
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let flags = r.read_i8()?;
        let category = if flags & STOP_CATEGORY != 0 {
            Some(r.read_enum()?)
        } else {
            None
        };
        let sound = if flags & STOP_SOUND != 0 {
            Some(r.read_identifier()?)
        } else {
            None
        };
        Ok(Self { category, sound })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stop_sound_flags() {
        let packet = StopSound {
            category: None,
            sound: Some(Identifier::parse("music.game").unwrap()),
        };
        let bytes = encode(&packet);
        assert_eq!(bytes[0] as i8, STOP_SOUND);
        assert_eq!(reencode(&packet), packet);

        assert_eq!(
            decode::<StopSound>(&[0x01, 0x03]).unwrap(),
            StopSound {
                category: Some(SoundCategory::Weather),
                sound: None,
            }
        );
    }

    #[test]
    fn test_sound_coordinate() {
        assert_eq!(sound_coordinate(1.5), 12);
        assert_eq!(sound_coordinate(-2.0), -16);
    }
}
