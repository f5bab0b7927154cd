//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod error;
pub mod release;
pub mod validation;

pub use error::{
    ClientError, DecodeError, EncodeError, IdentifierError, ProtocolError, RegistryError,
};
