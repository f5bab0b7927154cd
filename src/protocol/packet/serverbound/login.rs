//! Serverbound login packets.

use bytes::Bytes;

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

/// Usernames are at most 16 characters
pub const MAX_USERNAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStart {
    pub name: String,
}

impl Packet for LoginStart {
    const ID: i32 = 0x00;
    const NAME: &'static str = "LoginStart";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.name);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            name: r.read_string(MAX_USERNAME_LEN)?,
        })
    }
}

/// Shared secret and verify token, both encrypted with the server key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionResponse {
    pub shared_secret: Bytes,
    pub verify_token: Bytes,
}

impl Packet for EncryptionResponse {
    const ID: i32 = 0x01;
    const NAME: &'static str = "EncryptionResponse";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_byte_array(&self.shared_secret)
            .write_byte_array(&self.verify_token);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            shared_secret: r.read_byte_array()?,
            verify_token: r.read_byte_array()?,
        })
    }
}

/// Answer to a login plugin request; `None` means the channel is not
/// understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPluginResponse {
    pub message_id: i32,
    pub data: Option<Bytes>,
}

impl Packet for LoginPluginResponse {
    const ID: i32 = 0x02;
    const NAME: &'static str = "LoginPluginResponse";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.message_id)
            .write_option(self.data.as_ref(), |w, data| {
                w.write_bytes(data);
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message_id: r.read_var_int()?,
            data: r.read_option(|r| Ok(r.read_remaining()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unsupported_plugin_channel() {
        let packet = LoginPluginResponse {
            message_id: 4,
            data: None,
        };
        assert_eq!(encode(&packet), vec![0x04, 0x00]);
        assert_eq!(decode::<LoginPluginResponse>(&[0x04, 0x00]).unwrap(), packet);
    }

    #[test]
    fn test_login_start_name_limit() {
        assert_eq!(
            decode::<LoginStart>(b"\x05Steve").unwrap().name,
            "Steve"
        );
        let mut long = vec![17];
        long.extend_from_slice(&[b'a'; 17]);
        assert!(decode::<LoginStart>(&long).is_err());
    }
}
