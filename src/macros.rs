//! Crate-internal macros.

/// Declares a fieldless enum carried on the wire as a numeric id.
///
/// The generated type implements [`crate::protocol::io::WireEnum`], which is
/// what the reader and writer use to encode it as a VarInt, byte or
/// unsigned byte depending on the packet.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $id:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $id ),+
        }

        impl $crate::protocol::io::WireEnum for $name {
            const KIND: &'static str = stringify!($name);

            fn id(self) -> i32 {
                self as i32
            }

            fn from_id(id: i32) -> Option<Self> {
                match id {
                    $( x if x == $id => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

/// Declares a packet enum with one variant per packet struct.
macro_rules! packet_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $variant($ty) ),+
        }

        impl $name {
            /// Packet id within its state
            pub fn id(&self) -> i32 {
                match self {
                    $( $name::$variant(_) => <$ty as $crate::protocol::packet::Packet>::ID ),+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => <$ty as $crate::protocol::packet::Packet>::NAME ),+
                }
            }

            /// Encode the body without the id
            pub fn encode(&self, w: &mut $crate::protocol::io::PacketWriter) {
                match self {
                    $( $name::$variant(packet) => $crate::protocol::packet::Packet::encode(packet, w) ),+
                }
            }

            /// Encode into an unframed id and payload
            pub fn to_raw(
                &self,
            ) -> Result<$crate::protocol::codec::RawPacket, $crate::shared::error::EncodeError> {
                let mut w = $crate::protocol::io::PacketWriter::new();
                self.encode(&mut w);
                Ok($crate::protocol::codec::RawPacket {
                    id: self.id(),
                    payload: w.finish()?,
                })
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(packet: $ty) -> Self {
                    $name::$variant(packet)
                }
            }

            impl $crate::protocol::packet::PacketKind<$name> for $ty {
                fn from_packet(packet: &$name) -> Option<&Self> {
                    match packet {
                        $name::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}
