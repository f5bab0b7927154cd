//! Wire Primitives
//!
//! Reading and writing of the protocol's data types over `bytes` buffers.

mod reader;
pub mod varint;
mod writer;

pub use reader::PacketReader;
pub use writer::PacketWriter;

/// Maximum length of a chat component string
pub const MAX_COMPONENT_LEN: usize = 262_144;

/// Maximum length of an identifier string
pub const MAX_IDENTIFIER_LEN: usize = 32_767;

/// Maximum length of an unrestricted string
pub const MAX_STRING_LEN: usize = 32_767;

/// A fieldless enum sent as its numeric id.
///
/// Implemented by the `wire_enum!` macro.
pub trait WireEnum: Sized + Copy {
    /// Name used in decode errors
    const KIND: &'static str;

    fn id(self) -> i32;

    fn from_id(id: i32) -> Option<Self>;
}
