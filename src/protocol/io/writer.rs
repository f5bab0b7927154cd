use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use super::{varint, WireEnum};
use crate::protocol::component::Component;
use crate::protocol::item::{ItemStack, Property};
use crate::protocol::nbt::Compound;
use crate::shared::error::EncodeError;
use crate::world::{BlockPosition, Direction, Identifier, Position, Velocity};

/// Growable packet payload buffer.
///
/// Writes chain, mirroring [`super::PacketReader`]. A value the wire cannot
/// carry is recorded with [`PacketWriter::fail`] and surfaces from
/// [`PacketWriter::finish`].
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    buf: BytesMut,
    error: Option<EncodeError>,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Payload, or the first error recorded while writing it
    pub fn finish(self) -> Result<Bytes, EncodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.buf.freeze()),
        }
    }

    /// Record that a value could not be written; the first error wins
    pub fn fail(&mut self, err: EncodeError) -> &mut Self {
        self.error.get_or_insert(err);
        self
    }

    pub fn error(&self) -> Option<&EncodeError> {
        self.error.as_ref()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(u8::from(value));
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.buf.put_i8(value);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.buf.put_i16(value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16(value);
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.put_i32(value);
        self
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.buf.put_i64(value);
        self
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.buf.put_f32(value);
        self
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.buf.put_f64(value);
        self
    }

    pub fn write_var_int(&mut self, value: i32) -> &mut Self {
        varint::write_var_int(&mut self.buf, value);
        self
    }

    pub fn write_var_long(&mut self, value: i64) -> &mut Self {
        varint::write_var_long(&mut self.buf, value);
        self
    }

    pub fn write_length(&mut self, len: usize) -> &mut Self {
        self.write_var_int(len as i32)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    pub fn write_byte_array(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_length(bytes.len()).write_bytes(bytes)
    }

    pub fn write_var_int_array(&mut self, values: &[i32]) -> &mut Self {
        self.write_list(values, |w, v| {
            w.write_var_int(*v);
        })
    }

    pub fn write_long_array(&mut self, values: &[i64]) -> &mut Self {
        self.write_list(values, |w, v| {
            w.write_i64(*v);
        })
    }

    /// String prefixed with its UTF-8 byte length
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_byte_array(value.as_bytes())
    }

    pub fn write_identifier(&mut self, value: &Identifier) -> &mut Self {
        self.write_string(&value.to_string())
    }

    pub fn write_component(&mut self, value: &Component) -> &mut Self {
        self.write_string(&value.to_json())
    }

    pub fn write_uuid(&mut self, value: &Uuid) -> &mut Self {
        self.buf.put_u128(value.as_u128());
        self
    }

    pub fn write_block_position(&mut self, value: &BlockPosition) -> &mut Self {
        self.write_i64(value.to_packed())
    }

    pub fn write_position(&mut self, value: &Position) -> &mut Self {
        self.write_f64(value.x).write_f64(value.y).write_f64(value.z)
    }

    pub fn write_velocity(&mut self, value: &Velocity) -> &mut Self {
        self.write_i16(value.x).write_i16(value.y).write_i16(value.z)
    }

    /// Pitch then yaw
    pub fn write_direction(&mut self, value: &Direction) -> &mut Self {
        self.write_i8(value.pitch).write_i8(value.yaw)
    }

    /// Yaw then pitch
    pub fn write_yaw_pitch(&mut self, value: &Direction) -> &mut Self {
        self.write_i8(value.yaw).write_i8(value.pitch)
    }

    pub fn write_compound(&mut self, value: &Compound) -> &mut Self {
        value.write_root(self);
        self
    }

    /// Writes an end tag for `None`
    pub fn write_optional_compound(&mut self, value: Option<&Compound>) -> &mut Self {
        match value {
            Some(compound) => self.write_compound(compound),
            None => self.write_u8(0),
        }
    }

    pub fn write_slot(&mut self, value: Option<&ItemStack>) -> &mut Self {
        self.write_option(value, |w, stack| {
            w.write_var_int(stack.item_id)
                .write_i8(stack.count)
                .write_optional_compound(stack.tag.as_ref());
        })
    }

    pub fn write_property(&mut self, value: &Property) -> &mut Self {
        self.write_string(&value.name)
            .write_string(&value.value)
            .write_option(value.signature.as_ref(), |w, signature| {
                w.write_string(signature);
            })
    }

    /// Presence flag followed by the value
    pub fn write_option<T>(&mut self, value: Option<T>, write: impl FnOnce(&mut Self, T)) -> &mut Self {
        match value {
            Some(value) => {
                self.write_bool(true);
                write(self, value);
            }
            None => {
                self.write_bool(false);
            }
        }
        self
    }

    /// VarInt count followed by the elements
    pub fn write_list<T>(&mut self, values: &[T], mut write: impl FnMut(&mut Self, &T)) -> &mut Self {
        self.write_length(values.len());
        for value in values {
            write(self, value);
        }
        self
    }

    pub fn write_enum<E: WireEnum>(&mut self, value: E) -> &mut Self {
        self.write_var_int(value.id())
    }

    pub fn write_u8_enum<E: WireEnum>(&mut self, value: E) -> &mut Self {
        self.write_u8(value.id() as u8)
    }

    pub fn write_i8_enum<E: WireEnum>(&mut self, value: E) -> &mut Self {
        self.write_i8(value.id() as i8)
    }
}
