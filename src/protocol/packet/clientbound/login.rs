//! Clientbound login packets.

use bytes::Bytes;
use uuid::Uuid;

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::Identifier;

/// Login refused
#[derive(Debug, Clone, PartialEq)]
pub struct Disconnect {
    pub reason: Component,
}

impl Packet for Disconnect {
    const ID: i32 = 0x00;
    const NAME: &'static str = "LoginDisconnect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.reason);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            reason: r.read_component()?,
        })
    }
}

/// Start of online-mode authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionRequest {
    pub server_id: String,
    pub public_key: Bytes,
    pub verify_token: Bytes,
}

impl Packet for EncryptionRequest {
    const ID: i32 = 0x01;
    const NAME: &'static str = "EncryptionRequest";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.server_id)
            .write_byte_array(&self.public_key)
            .write_byte_array(&self.verify_token);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            server_id: r.read_string(20)?,
            public_key: r.read_byte_array()?,
            verify_token: r.read_byte_array()?,
        })
    }
}

/// Login accepted; the connection switches to the play state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub uuid: Uuid,
    pub username: String,
}

impl Packet for LoginSuccess {
    const ID: i32 = 0x02;
    const NAME: &'static str = "LoginSuccess";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_uuid(&self.uuid).write_string(&self.username);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            uuid: r.read_uuid()?,
            username: r.read_string(16)?,
        })
    }
}

/// Enables compression for every following frame in both directions.
///
/// A negative threshold disables compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCompression {
    pub threshold: i32,
}

impl Packet for SetCompression {
    const ID: i32 = 0x03;
    const NAME: &'static str = "SetCompression";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.threshold);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            threshold: r.read_var_int()?,
        })
    }
}

/// Custom login negotiation on a plugin channel
#[derive(Debug, Clone, PartialEq)]
pub struct LoginPluginRequest {
    pub message_id: i32,
    pub channel: Identifier,
    pub data: Bytes,
}

impl Packet for LoginPluginRequest {
    const ID: i32 = 0x04;
    const NAME: &'static str = "LoginPluginRequest";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.message_id)
            .write_identifier(&self.channel)
            .write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message_id: r.read_var_int()?,
            channel: r.read_identifier()?,
            data: r.read_remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode};

    #[test]
    fn test_login_success_layout() {
        let packet = LoginSuccess {
            uuid: Uuid::from_u128(1),
            username: "Steve".to_string(),
        };
        let bytes = encode(&packet);
        assert_eq!(bytes.len(), 16 + 1 + 5);
        assert_eq!(bytes[15], 1);
        assert_eq!(&bytes[16..], b"\x05Steve");
        assert_eq!(decode::<LoginSuccess>(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_login_success_rejects_long_name() {
        let mut bytes = vec![0u8; 16];
        bytes.push(17);
        bytes.extend_from_slice(b"abcdefghijklmnopq");
        assert!(decode::<LoginSuccess>(&bytes).is_err());
    }

    #[test]
    fn test_plugin_request_keeps_remaining_data() {
        let mut bytes = vec![0x07];
        bytes.push(14);
        bytes.extend_from_slice(b"velocity:hello");
        bytes.extend_from_slice(&[1, 2, 3]);

        let packet = decode::<LoginPluginRequest>(&bytes).unwrap();
        assert_eq!(packet.message_id, 7);
        assert_eq!(packet.channel.to_string(), "velocity:hello");
        assert_eq!(&packet.data[..], &[1, 2, 3]);
    }
}
