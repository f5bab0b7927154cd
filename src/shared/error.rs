//! Error Types
//!
//! Centralized error handling for the wire codec, the connection layer and
//! the client API.

use std::io;

use crate::protocol::component::Component;
use crate::protocol::state::ConnectionState;

/// Identifier parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("Identifier must not be empty")]
    Empty,

    #[error("Identifier contains more than one ':': {0}")]
    TooManySeparators(String),

    #[error("Invalid namespace '{0}', expected [0-9a-z_-]+")]
    InvalidNamespace(String),

    #[error("Invalid value '{0}', expected [0-9a-z_/.-]+")]
    InvalidValue(String),
}

/// Malformed wire data
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unexpected end of packet: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("VarInt is too long")]
    VarIntTooLong,

    #[error("VarLong is too long")]
    VarLongTooLong,

    #[error("Negative length: {0}")]
    NegativeLength(i32),

    #[error("String is {actual} characters long, maximum is {max}")]
    StringTooLong { max: usize, actual: usize },

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid chat component: {0}")]
    InvalidComponent(#[from] serde_json::Error),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Unknown {kind} id: {id}")]
    UnknownEnumId { kind: &'static str, id: i32 },

    #[error("Invalid NBT: {0}")]
    InvalidNbt(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Unknown packet 0x{id:02X} in state {state}")]
    UnknownPacket { state: ConnectionState, id: i32 },

    #[error("Failed to decode {name}: {source}")]
    Packet {
        name: &'static str,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("Decompression failed: {0}")]
    Decompression(#[source] io::Error),

    #[error("Declared data length {declared} does not match inflated length {actual}")]
    DataLengthMismatch { declared: usize, actual: usize },

    #[error("Frame of {length} bytes exceeds the maximum of {max}")]
    FrameTooLarge { length: usize, max: usize },
}

impl DecodeError {
    /// Whether the connection can skip the offending packet and continue.
    ///
    /// Only errors confined to a single packet body qualify; framing errors
    /// leave the stream out of sync.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            DecodeError::UnknownPacket { .. } | DecodeError::Packet { .. }
        )
    }

    /// Short stable label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::UnexpectedEof { .. } => "unexpected_eof",
            DecodeError::VarIntTooLong | DecodeError::VarLongTooLong => "varint",
            DecodeError::NegativeLength(_) => "negative_length",
            DecodeError::StringTooLong { .. } => "string_too_long",
            DecodeError::InvalidUtf8(_) => "utf8",
            DecodeError::InvalidComponent(_) => "component",
            DecodeError::InvalidIdentifier(_) => "identifier",
            DecodeError::UnknownEnumId { .. } => "enum",
            DecodeError::InvalidNbt(_) => "nbt",
            DecodeError::InvalidField { .. } => "field",
            DecodeError::UnknownPacket { .. } => "unknown_packet",
            DecodeError::Packet { .. } => "packet",
            DecodeError::Decompression(_) | DecodeError::DataLengthMismatch { .. } => {
                "decompression"
            }
            DecodeError::FrameTooLarge { .. } => "frame_too_large",
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Value the wire format cannot carry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("NBT string of {actual} bytes exceeds the maximum of {max}")]
    NbtStringTooLong { max: usize, actual: usize },

    #[error("NBT list of tag {expected} also holds tag {found}")]
    MixedList { expected: u8, found: u8 },

    #[error("NBT nesting deeper than {0}")]
    NbtTooDeep(usize),

    #[error("Frame of {length} bytes exceeds the maximum of {max}")]
    FrameTooLarge { length: usize, max: usize },
}

/// Packet registry construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Packet id 0x{id:02X} in state {state} is registered by both {first} and {second}")]
    DuplicateId {
        state: ConnectionState,
        id: i32,
        first: &'static str,
        second: &'static str,
    },
}

/// Connection level error
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to encode packet: {0}")]
    Encode(#[from] EncodeError),

    #[error("Connection closed")]
    ChannelClosed,
}

impl ProtocolError {
    /// Whether the connection is unusable afterwards.
    ///
    /// An encode error rejects one outgoing packet before any byte of it is
    /// written, so the stream stays in sync.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ProtocolError::Encode(_))
    }
}

/// Client API error
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid name '{0}': must be 1 to 16 characters")]
    InvalidName(String),

    #[error("Invalid protocol version: {0}")]
    InvalidProtocolVersion(i32),

    #[error("Host must not be empty")]
    EmptyHost,

    #[error("Client is already connected")]
    AlreadyConnected,

    #[error("Disconnected by server: {0}")]
    Disconnected(Component),

    #[error("Server requested encryption; online mode is not supported")]
    EncryptionUnsupported,

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Message is {len} characters long, maximum is {max}")]
    MessageTooLong { len: usize, max: usize },

    #[error("Not connected")]
    NotConnected,

    #[error("Unexpected packet: {0}")]
    UnexpectedPacket(&'static str),

    #[error("Invalid status response: {0}")]
    InvalidStatus(#[source] serde_json::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Protocol(ProtocolError::Io(err))
    }
}

impl From<DecodeError> for ClientError {
    fn from(err: DecodeError) -> Self {
        ClientError::Protocol(ProtocolError::Decode(err))
    }
}

impl From<EncodeError> for ClientError {
    fn from(err: EncodeError) -> Self {
        ClientError::Protocol(ProtocolError::Encode(err))
    }
}
