use bytes::{Buf, Bytes};
use uuid::Uuid;

use super::{varint, WireEnum, MAX_COMPONENT_LEN, MAX_IDENTIFIER_LEN};
use crate::protocol::component::Component;
use crate::protocol::item::{ItemStack, Property};
use crate::protocol::nbt::Compound;
use crate::shared::error::DecodeError;
use crate::world::{BlockPosition, Direction, Identifier, Position, Velocity};

/// Cursor over a packet payload.
///
/// Every read checks the remaining length first, so malformed input yields
/// [`DecodeError::UnexpectedEof`] instead of a panic.
#[derive(Debug, Clone)]
pub struct PacketReader {
    buf: Bytes,
}

impl PacketReader {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self { buf: buf.into() }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(DecodeError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    // ==========================================================================
    // Primitives
    // ==========================================================================

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.ensure(2)?;
        Ok(self.buf.get_i16())
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.ensure(2)?;
        Ok(self.buf.get_u16())
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.ensure(4)?;
        Ok(self.buf.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_f64())
    }

    pub fn read_var_int(&mut self) -> Result<i32, DecodeError> {
        varint::read_var_int(&mut self.buf)
    }

    pub fn read_var_long(&mut self) -> Result<i64, DecodeError> {
        varint::read_var_long(&mut self.buf)
    }

    /// VarInt length prefix, rejected when negative
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let length = self.read_var_int()?;
        usize::try_from(length).map_err(|_| DecodeError::NegativeLength(length))
    }

    // ==========================================================================
    // Byte runs
    // ==========================================================================

    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }

    /// VarInt-prefixed byte array
    pub fn read_byte_array(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    pub fn read_remaining(&mut self) -> Bytes {
        let len = self.buf.remaining();
        self.buf.split_to(len)
    }

    pub fn read_var_int_array(&mut self) -> Result<Vec<i32>, DecodeError> {
        self.read_list(|r| r.read_var_int())
    }

    pub fn read_long_array(&mut self) -> Result<Vec<i64>, DecodeError> {
        self.read_list(|r| r.read_i64())
    }

    // ==========================================================================
    // Strings and text
    // ==========================================================================

    /// UTF-8 string with a VarInt byte length, limited to `max_chars`
    /// characters.
    pub fn read_string(&mut self, max_chars: usize) -> Result<String, DecodeError> {
        let len = self.read_length()?;
        if len > max_chars * 4 {
            return Err(DecodeError::StringTooLong {
                max: max_chars,
                actual: len,
            });
        }
        let bytes = self.read_bytes(len)?;
        let string = String::from_utf8(bytes.to_vec())?;
        let chars = string.chars().count();
        if chars > max_chars {
            return Err(DecodeError::StringTooLong {
                max: max_chars,
                actual: chars,
            });
        }
        Ok(string)
    }

    pub fn read_identifier(&mut self) -> Result<Identifier, DecodeError> {
        let raw = self.read_string(MAX_IDENTIFIER_LEN)?;
        Ok(Identifier::parse(&raw)?)
    }

    pub fn read_component(&mut self) -> Result<Component, DecodeError> {
        let raw = self.read_string(MAX_COMPONENT_LEN)?;
        Component::from_json(&raw)
    }

    // ==========================================================================
    // Composite types
    // ==========================================================================

    pub fn read_uuid(&mut self) -> Result<Uuid, DecodeError> {
        self.ensure(16)?;
        Ok(Uuid::from_u128(self.buf.get_u128()))
    }

    pub fn read_block_position(&mut self) -> Result<BlockPosition, DecodeError> {
        Ok(BlockPosition::from_packed(self.read_i64()?))
    }

    pub fn read_position(&mut self) -> Result<Position, DecodeError> {
        Ok(Position::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    pub fn read_velocity(&mut self) -> Result<Velocity, DecodeError> {
        Ok(Velocity::new(
            self.read_i16()?,
            self.read_i16()?,
            self.read_i16()?,
        ))
    }

    /// Pitch then yaw
    pub fn read_direction(&mut self) -> Result<Direction, DecodeError> {
        let pitch = self.read_i8()?;
        let yaw = self.read_i8()?;
        Ok(Direction::new(pitch, yaw))
    }

    /// Yaw then pitch, the order most entity packets use
    pub fn read_yaw_pitch(&mut self) -> Result<Direction, DecodeError> {
        let yaw = self.read_i8()?;
        let pitch = self.read_i8()?;
        Ok(Direction::new(pitch, yaw))
    }

    /// Root compound; an end tag decodes to an empty compound
    pub fn read_compound(&mut self) -> Result<Compound, DecodeError> {
        Ok(Compound::read_root(self)?.unwrap_or_default())
    }

    /// Root compound where an end tag means absent
    pub fn read_optional_compound(&mut self) -> Result<Option<Compound>, DecodeError> {
        Compound::read_root(self)
    }

    /// Item slot: a presence flag followed by the stack
    pub fn read_slot(&mut self) -> Result<Option<ItemStack>, DecodeError> {
        self.read_option(|r| {
            Ok(ItemStack {
                item_id: r.read_var_int()?,
                count: r.read_i8()?,
                tag: r.read_optional_compound()?,
            })
        })
    }

    pub fn read_property(&mut self) -> Result<Property, DecodeError> {
        Ok(Property {
            name: self.read_string(32_767)?,
            value: self.read_string(32_767)?,
            signature: self.read_option(|r| r.read_string(32_767))?,
        })
    }

    // ==========================================================================
    // Combinators
    // ==========================================================================

    /// Boolean presence flag followed by the value
    pub fn read_option<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.read_bool()? {
            Ok(Some(read(self)?))
        } else {
            Ok(None)
        }
    }

    /// VarInt count followed by the elements
    pub fn read_list<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.read_length()?;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }

    fn to_enum<E: WireEnum>(id: i32) -> Result<E, DecodeError> {
        E::from_id(id).ok_or(DecodeError::UnknownEnumId { kind: E::KIND, id })
    }

    /// Enum sent as a VarInt
    pub fn read_enum<E: WireEnum>(&mut self) -> Result<E, DecodeError> {
        let id = self.read_var_int()?;
        Self::to_enum(id)
    }

    /// Enum sent as an unsigned byte
    pub fn read_u8_enum<E: WireEnum>(&mut self) -> Result<E, DecodeError> {
        let id = self.read_u8()?;
        Self::to_enum(i32::from(id))
    }

    /// Enum sent as a signed byte
    pub fn read_i8_enum<E: WireEnum>(&mut self) -> Result<E, DecodeError> {
        let id = self.read_i8()?;
        Self::to_enum(i32::from(id))
    }

    /// `f32` that must lie within `min..=max`
    pub fn read_f32_in(
        &mut self,
        field: &'static str,
        min: f32,
        max: f32,
    ) -> Result<f32, DecodeError> {
        let value = self.read_f32()?;
        if !(min..=max).contains(&value) {
            return Err(DecodeError::invalid(
                field,
                format!("{} is outside {}..={}", value, min, max),
            ));
        }
        Ok(value)
    }

    /// `i8` that must lie within `min..=max`
    pub fn read_i8_in(&mut self, field: &'static str, min: i8, max: i8) -> Result<i8, DecodeError> {
        let value = self.read_i8()?;
        if !(min..=max).contains(&value) {
            return Err(DecodeError::invalid(
                field,
                format!("{} is outside {}..={}", value, min, max),
            ));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reader(bytes: &'static [u8]) -> PacketReader {
        PacketReader::new(Bytes::from_static(bytes))
    }

    #[test]
    fn test_primitives_are_big_endian() {
        let mut r = reader(&[0x01, 0x02, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(r.read_u16().unwrap(), 0x0102);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_i32().unwrap(), 256);
        assert!(r.is_empty());
    }

    #[test]
    fn test_eof_is_reported() {
        let mut r = reader(&[0x00, 0x01]);
        match r.read_i32() {
            Err(DecodeError::UnexpectedEof { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_string() {
        let mut r = reader(b"\x05hello");
        assert_eq!(r.read_string(16).unwrap(), "hello");
    }

    #[test]
    fn test_read_string_counts_characters() {
        // four characters, twelve bytes
        let mut r = reader("\x0c日本語字".as_bytes());
        assert_eq!(r.read_string(4).unwrap(), "日本語字");

        let mut r = reader("\x0c日本語字".as_bytes());
        assert!(matches!(
            r.read_string(3),
            Err(DecodeError::StringTooLong { max: 3, actual: 4 })
        ));
    }

    #[test]
    fn test_read_string_rejects_oversized_prefix() {
        let mut r = reader(b"\x7fabc");
        assert!(matches!(
            r.read_string(16),
            Err(DecodeError::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_negative_length() {
        let mut r = reader(&[0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert!(matches!(
            r.read_byte_array(),
            Err(DecodeError::NegativeLength(-1))
        ));
    }

    #[test]
    fn test_read_uuid() {
        let mut r = reader(&[
            0x06, 0x9a, 0x79, 0xf4, 0x44, 0xe9, 0x47, 0x26, 0xa5, 0xbe, 0xfc, 0xa9, 0x0e, 0x38,
            0xaa, 0xf5,
        ]);
        assert_eq!(
            r.read_uuid().unwrap().to_string(),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
    }

    #[test]
    fn test_read_option_and_list() {
        let mut r = reader(&[0x01, 0x2a, 0x00, 0x03, 0x01, 0x02, 0x03]);
        assert_eq!(r.read_option(|r| r.read_u8()).unwrap(), Some(42));
        assert_eq!(r.read_option(|r| r.read_u8()).unwrap(), None);
        assert_eq!(r.read_var_int_array().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_enum_rejects_unknown_id() {
        use crate::world::BlockFace;

        let mut r = reader(&[0x09]);
        assert!(matches!(
            r.read_enum::<BlockFace>(),
            Err(DecodeError::UnknownEnumId {
                kind: "BlockFace",
                id: 9
            })
        ));
    }

    #[test]
    fn test_read_f32_in_range() {
        let mut r = reader(&[0x3f, 0x80, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00]);
        assert_eq!(r.read_f32_in("cursor", 0.0, 1.0).unwrap(), 1.0);
        assert!(r.read_f32_in("cursor", 0.0, 1.0).is_err());
    }

    #[test]
    fn test_read_slot() {
        let mut r = reader(&[0x01, 0x01, 0x40, 0x00, 0x00]);
        assert_eq!(
            r.read_slot().unwrap(),
            Some(ItemStack {
                item_id: 1,
                count: 64,
                tag: None,
            })
        );
        assert_eq!(r.read_slot().unwrap(), None);
    }
}
