//! Player and vehicle movement.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::Position;

/// Acknowledges a server teleport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportConfirm {
    pub teleport_id: i32,
}

impl Packet for TeleportConfirm {
    const ID: i32 = 0x00;
    const NAME: &'static str = "TeleportConfirm";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.teleport_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            teleport_id: r.read_var_int()?,
        })
    }
}

/// Position of the player's feet
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPosition {
    pub position: Position,
    pub on_ground: bool,
}

impl Packet for PlayerPosition {
    const ID: i32 = 0x11;
    const NAME: &'static str = "PlayerPosition";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_position(&self.position).write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            position: r.read_position()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndRotation {
    pub position: Position,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Packet for PlayerPositionAndRotation {
    const ID: i32 = 0x12;
    const NAME: &'static str = "PlayerPositionAndRotation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_position(&self.position)
            .write_f32(self.yaw)
            .write_f32(self.pitch)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            position: r.read_position()?,
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Packet for PlayerRotation {
    const ID: i32 = 0x13;
    const NAME: &'static str = "PlayerRotation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f32(self.yaw)
            .write_f32(self.pitch)
            .write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
            on_ground: r.read_bool()?,
        })
    }
}

/// Sent when standing still so the server sees the ground state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMovement {
    pub on_ground: bool,
}

impl Packet for PlayerMovement {
    const ID: i32 = 0x14;
    const NAME: &'static str = "PlayerMovement";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bool(self.on_ground);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMove {
    pub position: Position,
    pub yaw: f32,
    pub pitch: f32,
}

impl Packet for VehicleMove {
    const ID: i32 = 0x15;
    const NAME: &'static str = "VehicleMove";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_position(&self.position)
            .write_f32(self.yaw)
            .write_f32(self.pitch);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            position: r.read_position()?,
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }
}

/// Paddle state of a boat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteerBoat {
    pub left_paddle: bool,
    pub right_paddle: bool,
}

impl Packet for SteerBoat {
    const ID: i32 = 0x16;
    const NAME: &'static str = "SteerBoat";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bool(self.left_paddle)
            .write_bool(self.right_paddle);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            left_paddle: r.read_bool()?,
            right_paddle: r.read_bool()?,
        })
    }
}

/// Bits of [`SteerVehicle::flags`]
pub const STEER_JUMP: u8 = 0x01;
pub const STEER_UNMOUNT: u8 = 0x02;

#[derive(Debug, Clone, PartialEq)]
pub struct SteerVehicle {
    /// Positive to the left
    pub sideways: f32,
    pub forward: f32,
    pub flags: u8,
}

impl Packet for SteerVehicle {
    const ID: i32 = 0x1C;
    const NAME: &'static str = "SteerVehicle";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f32(self.sideways)
            .write_f32(self.forward)
            .write_u8(self.flags);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            sideways: r.read_f32()?,
            forward: r.read_f32()?,
            flags: r.read_u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_player_position_layout() {
        let packet = PlayerPosition {
            position: Position::new(1.0, 64.0, -1.0),
            on_ground: true,
        };
        let bytes = encode(&packet);
        assert_eq!(bytes.len(), 25);
        assert_eq!(&bytes[..8], &1.0f64.to_be_bytes());
        assert_eq!(bytes[24], 1);
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_steer_vehicle_flags() {
        let packet = SteerVehicle {
            sideways: 0.0,
            forward: 0.98,
            flags: STEER_JUMP | STEER_UNMOUNT,
        };
        assert_eq!(encode(&packet)[8], 0x03);
        assert_eq!(reencode(&packet), packet);
    }
}
