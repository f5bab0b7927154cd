//! Packet Formats
//!
//! How a packet's id and payload are laid out inside a length-prefixed
//! frame, before and after the server enables compression.

use std::io::{self, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::codec::RawPacket;
use super::io::varint;
use crate::shared::error::DecodeError;

/// Largest uncompressed body a compressed frame may declare
pub const MAX_DATA_LENGTH: usize = 8_388_608;

/// Byte-level compression used by [`PacketFormat::Compressed`].
#[cfg_attr(test, mockall::automock)]
pub trait Compression: Send + Sync {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    /// Inflate `data`, producing at most `limit` bytes
    fn decompress(&self, data: &[u8], limit: usize) -> io::Result<Vec<u8>>;
}

/// zlib streams, as used by the vanilla server
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompression {
    level: flate2::Compression,
}

impl ZlibCompression {
    /// `level` ranges from 0 (store) to 9 (best)
    pub fn new(level: u32) -> Self {
        Self {
            level: flate2::Compression::new(level.min(9)),
        }
    }
}

impl Default for ZlibCompression {
    fn default() -> Self {
        Self {
            level: flate2::Compression::default(),
        }
    }
}

impl Compression for ZlibCompression {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), self.level);
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(&self, data: &[u8], limit: usize) -> io::Result<Vec<u8>> {
        let mut inflated = Vec::new();
        ZlibDecoder::new(data)
            .take(limit as u64)
            .read_to_end(&mut inflated)?;
        Ok(inflated)
    }
}

/// Layout of a frame body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacketFormat {
    /// `id` then payload
    #[default]
    Uncompressed,
    /// Data length, then `id` and payload, zlib compressed when the
    /// uncompressed body is at least `threshold` bytes long.
    ///
    /// A data length of 0 marks an uncompressed body.
    Compressed { threshold: usize },
}

impl PacketFormat {
    /// Format announced by a set compression packet; a negative threshold
    /// disables compression.
    pub fn from_threshold(threshold: i32) -> Self {
        match usize::try_from(threshold) {
            Ok(threshold) => PacketFormat::Compressed { threshold },
            Err(_) => PacketFormat::Uncompressed,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, PacketFormat::Compressed { .. })
    }

    /// Append the frame body for `packet` to `dst`, without the frame length.
    pub fn encode(
        &self,
        compression: &dyn Compression,
        packet: &RawPacket,
        dst: &mut BytesMut,
    ) -> io::Result<()> {
        let threshold = match *self {
            PacketFormat::Uncompressed => {
                write_body(packet, dst);
                return Ok(());
            }
            PacketFormat::Compressed { threshold } => threshold,
        };

        let data_length = varint::var_int_len(packet.id) + packet.payload.len();
        if data_length < threshold {
            varint::write_var_int(dst, 0);
            write_body(packet, dst);
            return Ok(());
        }

        let mut body = BytesMut::with_capacity(data_length);
        write_body(packet, &mut body);
        let compressed = compression.compress(&body)?;

        varint::write_var_int(dst, data_length as i32);
        dst.put_slice(&compressed);
        Ok(())
    }

    /// Split a frame body into id and payload.
    pub fn decode(
        &self,
        compression: &dyn Compression,
        mut frame: Bytes,
    ) -> Result<RawPacket, DecodeError> {
        let threshold = match *self {
            PacketFormat::Uncompressed => return read_body(frame),
            PacketFormat::Compressed { threshold } => threshold,
        };

        let data_length = varint::read_var_int(&mut frame)?;
        if data_length < 0 {
            return Err(DecodeError::NegativeLength(data_length));
        }
        if data_length == 0 {
            return read_body(frame);
        }

        let declared = data_length as usize;
        if declared > MAX_DATA_LENGTH {
            return Err(DecodeError::FrameTooLarge {
                length: declared,
                max: MAX_DATA_LENGTH,
            });
        }
        if declared < threshold {
            return Err(DecodeError::invalid(
                "data length",
                format!("{} is below the compression threshold {}", declared, threshold),
            ));
        }

        // One extra byte so an oversized stream shows up as a mismatch
        let inflated = compression
            .decompress(&frame, declared + 1)
            .map_err(DecodeError::Decompression)?;
        if inflated.len() != declared {
            return Err(DecodeError::DataLengthMismatch {
                declared,
                actual: inflated.len(),
            });
        }

        read_body(Bytes::from(inflated))
    }
}

fn write_body(packet: &RawPacket, dst: &mut BytesMut) {
    varint::write_var_int(dst, packet.id);
    dst.put_slice(&packet.payload);
}

fn read_body(mut body: Bytes) -> Result<RawPacket, DecodeError> {
    let id = varint::read_var_int(&mut body)?;
    Ok(RawPacket { id, payload: body })
}
