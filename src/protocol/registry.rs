//! Packet Registry
//!
//! Maps the packet ids of one connection state to decoder functions.

use std::collections::HashMap;
use std::fmt;

use super::codec::RawPacket;
use super::io::PacketReader;
use super::packet::Packet;
use super::state::ConnectionState;
use crate::shared::error::{DecodeError, RegistryError};

type DecodeFn<P> = fn(&mut PacketReader) -> Result<P, DecodeError>;

struct Entry<P> {
    name: &'static str,
    decode: DecodeFn<P>,
}

/// Decoders for the packets of one state, producing the packet enum `P`.
pub struct PacketRegistry<P> {
    state: ConnectionState,
    entries: HashMap<i32, Entry<P>>,
}

impl<P> PacketRegistry<P> {
    pub fn builder(state: ConnectionState) -> PacketRegistryBuilder<P> {
        PacketRegistryBuilder {
            state,
            entries: HashMap::new(),
            error: None,
        }
    }

    /// Registry that knows no packets
    pub fn empty(state: ConnectionState) -> Self {
        Self {
            state,
            entries: HashMap::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Name of the packet registered under `id`
    pub fn name_of(&self, id: i32) -> Option<&'static str> {
        self.entries.get(&id).map(|entry| entry.name)
    }

    /// Decode a raw packet.
    ///
    /// Unmapped ids yield [`DecodeError::UnknownPacket`] and body failures
    /// are wrapped in [`DecodeError::Packet`]; both are ignorable.
    pub fn decode(&self, raw: &RawPacket) -> Result<P, DecodeError> {
        let entry = self
            .entries
            .get(&raw.id)
            .ok_or(DecodeError::UnknownPacket {
                state: self.state,
                id: raw.id,
            })?;

        let mut reader = PacketReader::new(raw.payload.clone());
        let packet = (entry.decode)(&mut reader).map_err(|source| DecodeError::Packet {
            name: entry.name,
            source: Box::new(source),
        })?;

        if !reader.is_empty() {
            tracing::trace!(
                packet = entry.name,
                trailing = reader.remaining(),
                "Ignoring trailing bytes"
            );
        }
        Ok(packet)
    }
}

impl<P> fmt::Debug for PacketRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketRegistry")
            .field("state", &self.state)
            .field("packets", &self.entries.len())
            .finish()
    }
}

/// Collects packet types for a [`PacketRegistry`].
///
/// The first duplicate id is remembered and reported by [`build`](Self::build).
pub struct PacketRegistryBuilder<P> {
    state: ConnectionState,
    entries: HashMap<i32, Entry<P>>,
    error: Option<RegistryError>,
}

impl<P> PacketRegistryBuilder<P> {
    pub fn register<T>(mut self) -> Self
    where
        T: Packet,
        P: From<T>,
    {
        if self.error.is_some() {
            return self;
        }

        if let Some(existing) = self.entries.get(&T::ID) {
            self.error = Some(RegistryError::DuplicateId {
                state: self.state,
                id: T::ID,
                first: existing.name,
                second: T::NAME,
            });
            return self;
        }

        self.entries.insert(
            T::ID,
            Entry {
                name: T::NAME,
                decode: decode_as::<T, P>,
            },
        );
        self
    }

    pub fn build(self) -> Result<PacketRegistry<P>, RegistryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(PacketRegistry {
                state: self.state,
                entries: self.entries,
            }),
        }
    }
}

fn decode_as<T, P>(r: &mut PacketReader) -> Result<P, DecodeError>
where
    T: Packet,
    P: From<T>,
{
    T::decode(r).map(P::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::io::PacketWriter;
    use crate::protocol::packet::clientbound::{play, ClientboundPacket};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn raw(id: i32, payload: &[u8]) -> RawPacket {
        RawPacket {
            id,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    fn play_registry() -> PacketRegistry<ClientboundPacket> {
        PacketRegistry::builder(ConnectionState::Play)
            .register::<play::KeepAlive>()
            .register::<play::Ping>()
            .build()
            .unwrap()
    }

    // ==========================================================================
    // Builder
    // ==========================================================================

    #[test]
    fn test_builder_registers_packets() {
        let registry = play_registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(0x21));
        assert_eq!(registry.name_of(0x30), Some("Ping"));
        assert_eq!(registry.name_of(0x31), None);
    }

    #[test]
    fn test_builder_rejects_duplicate_id() {
        let result = PacketRegistry::<ClientboundPacket>::builder(ConnectionState::Play)
            .register::<play::KeepAlive>()
            .register::<play::KeepAlive>()
            .build();

        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateId {
                state: ConnectionState::Play,
                id: 0x21,
                first: "KeepAlive",
                second: "KeepAlive",
            }
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = PacketRegistry::<ClientboundPacket>::empty(ConnectionState::Disconnected);
        assert!(registry.is_empty());
        assert_eq!(registry.state(), ConnectionState::Disconnected);
    }

    // ==========================================================================
    // Decoding
    // ==========================================================================

    #[test]
    fn test_decode_known_packet() {
        let mut w = PacketWriter::new();
        w.write_i64(99);
        let packet = play_registry().decode(&raw(0x21, w.as_slice())).unwrap();
        assert_eq!(
            packet,
            ClientboundPacket::KeepAlive(play::KeepAlive { id: 99 })
        );
    }

    #[test]
    fn test_decode_unknown_id_is_ignorable() {
        let err = play_registry().decode(&raw(0x55, &[])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnknownPacket {
                state: ConnectionState::Play,
                id: 0x55
            }
        ));
        assert!(err.is_ignorable());
    }

    #[test]
    fn test_decode_truncated_body_names_packet() {
        let err = play_registry().decode(&raw(0x21, &[0, 0, 1])).unwrap_err();
        assert!(err.is_ignorable());
        match err {
            DecodeError::Packet { name, source } => {
                assert_eq!(name, "KeepAlive");
                assert!(matches!(*source, DecodeError::UnexpectedEof { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
