//! World border.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

#[derive(Debug, Clone, PartialEq)]
pub struct InitializeWorldBorder {
    pub x: f64,
    pub z: f64,
    pub old_diameter: f64,
    pub new_diameter: f64,
    /// Milliseconds until the new diameter is reached
    pub speed: i64,
    pub portal_teleport_boundary: i32,
    pub warning_blocks: i32,
    pub warning_time: i32,
}

impl Packet for InitializeWorldBorder {
    const ID: i32 = 0x20;
    const NAME: &'static str = "InitializeWorldBorder";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f64(self.x)
            .write_f64(self.z)
            .write_f64(self.old_diameter)
            .write_f64(self.new_diameter)
            .write_var_long(self.speed)
            .write_var_int(self.portal_teleport_boundary)
            .write_var_int(self.warning_blocks)
            .write_var_int(self.warning_time);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            x: r.read_f64()?,
            z: r.read_f64()?,
            old_diameter: r.read_f64()?,
            new_diameter: r.read_f64()?,
            speed: r.read_var_long()?,
            portal_teleport_boundary: r.read_var_int()?,
            warning_blocks: r.read_var_int()?,
            warning_time: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldBorderCenter {
    pub x: f64,
    pub z: f64,
}

impl Packet for WorldBorderCenter {
    const ID: i32 = 0x42;
    const NAME: &'static str = "WorldBorderCenter";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f64(self.x).write_f64(self.z);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            x: r.read_f64()?,
            z: r.read_f64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldBorderLerpSize {
    pub old_diameter: f64,
    pub new_diameter: f64,
    pub speed: i64,
}

impl Packet for WorldBorderLerpSize {
    const ID: i32 = 0x43;
    const NAME: &'static str = "WorldBorderLerpSize";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f64(self.old_diameter)
            .write_f64(self.new_diameter)
            .write_var_long(self.speed);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            old_diameter: r.read_f64()?,
            new_diameter: r.read_f64()?,
            speed: r.read_var_long()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldBorderSize {
    pub diameter: f64,
}

impl Packet for WorldBorderSize {
    const ID: i32 = 0x44;
    const NAME: &'static str = "WorldBorderSize";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_f64(self.diameter);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            diameter: r.read_f64()?,
        })
    }
}

/// Warning time in seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldBorderWarningDelay {
    pub warning_time: i32,
}

impl Packet for WorldBorderWarningDelay {
    const ID: i32 = 0x45;
    const NAME: &'static str = "WorldBorderWarningDelay";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.warning_time);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            warning_time: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldBorderWarningReach {
    pub warning_blocks: i32,
}

impl Packet for WorldBorderWarningReach {
    const ID: i32 = 0x46;
    const NAME: &'static str = "WorldBorderWarningReach";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.warning_blocks);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            warning_blocks: r.read_var_int()?,
        })
    }
}
