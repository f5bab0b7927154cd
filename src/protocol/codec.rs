//! Frame Codec
//!
//! VarInt length-prefixed framing for `tokio_util::codec`, delegating the
//! body layout to the connection's current [`PacketFormat`].

use std::fmt;
use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use parking_lot::RwLock;
use tokio_util::codec::{Decoder, Encoder};

use super::format::{Compression, PacketFormat, ZlibCompression};
use super::io::varint;
use crate::infrastructure::metrics;
use crate::shared::error::{DecodeError, EncodeError, ProtocolError};

/// Largest frame the length prefix may announce (three VarInt bytes)
pub const MAX_FRAME_LENGTH: usize = 2_097_151;

/// A packet id with its undecoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub id: i32,
    pub payload: Bytes,
}

/// Format shared between a connection's reader, writer and read loop.
///
/// Switching it takes effect from the next frame.
pub type SharedFormat = Arc<RwLock<PacketFormat>>;

#[derive(Clone)]
pub struct PacketCodec {
    format: SharedFormat,
    compression: Arc<dyn Compression>,
    max_frame_length: usize,
}

impl PacketCodec {
    pub fn new(format: SharedFormat) -> Self {
        Self {
            format,
            compression: Arc::new(ZlibCompression::default()),
            max_frame_length: MAX_FRAME_LENGTH,
        }
    }

    pub fn with_compression(mut self, compression: Arc<dyn Compression>) -> Self {
        self.compression = compression;
        self
    }

    /// Lower the frame limit; values above [`MAX_FRAME_LENGTH`] are clamped
    pub fn with_max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.max_frame_length = max_frame_length.min(MAX_FRAME_LENGTH);
        self
    }

    pub fn format(&self) -> PacketFormat {
        *self.format.read()
    }

    pub fn set_format(&self, format: PacketFormat) {
        *self.format.write() = format;
    }
}

impl fmt::Debug for PacketCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketCodec")
            .field("format", &self.format())
            .field("max_frame_length", &self.max_frame_length)
            .finish()
    }
}

impl Decoder for PacketCodec {
    type Item = RawPacket;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RawPacket>, ProtocolError> {
        let (length, header) = match varint::peek_var_int(src)? {
            Some(prefix) => prefix,
            None => return Ok(None),
        };

        if length < 0 {
            return Err(DecodeError::NegativeLength(length).into());
        }
        let length = length as usize;
        if length > self.max_frame_length {
            return Err(DecodeError::FrameTooLarge {
                length,
                max: self.max_frame_length,
            }
            .into());
        }

        let total = header + length;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(header);
        let frame = src.split_to(length).freeze();
        metrics::record_bytes("read", total);

        let format = self.format();
        Ok(Some(format.decode(self.compression.as_ref(), frame)?))
    }
}

impl Encoder<RawPacket> for PacketCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: RawPacket, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let mut body = BytesMut::new();
        self.format()
            .encode(self.compression.as_ref(), &packet, &mut body)?;

        // Nothing reaches dst, so the stream stays usable
        if body.len() > self.max_frame_length {
            return Err(EncodeError::FrameTooLarge {
                length: body.len(),
                max: self.max_frame_length,
            }
            .into());
        }

        let prefix = varint::var_int_len(body.len() as i32);
        dst.reserve(prefix + body.len());
        varint::write_var_int(dst, body.len() as i32);
        dst.put_slice(&body);
        metrics::record_bytes("written", prefix + body.len());
        Ok(())
    }
}
