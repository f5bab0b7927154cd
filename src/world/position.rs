//! Positions, rotations and velocities.

use std::fmt;

use super::identifier::Identifier;

/// Precise entity position in blocks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Entity velocity in units of 1/8000 of a block per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Velocity {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Velocity in blocks per tick
    pub fn blocks_per_tick(&self) -> (f64, f64, f64) {
        (
            f64::from(self.x) / 8000.0,
            f64::from(self.y) / 8000.0,
            f64::from(self.z) / 8000.0,
        )
    }
}

/// Pitch and yaw as protocol angles (1/256 of a full turn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Direction {
    pub pitch: i8,
    pub yaw: i8,
}

impl Direction {
    pub fn new(pitch: i8, yaw: i8) -> Self {
        Self { pitch, yaw }
    }

    /// Convert an angle in degrees to a protocol angle
    pub fn angle_from_degrees(degrees: f32) -> i8 {
        ((degrees.rem_euclid(360.0) / 360.0 * 256.0) as i32 & 0xFF) as u8 as i8
    }

    /// Convert a protocol angle to degrees in `[0, 360)`
    pub fn angle_to_degrees(angle: i8) -> f32 {
        f32::from(angle as u8) * 360.0 / 256.0
    }
}

/// Integer block coordinates.
///
/// On the wire the position is packed into a single long: x in the top 26
/// bits, z in the next 26 and y in the low 12, all two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn to_packed(&self) -> i64 {
        ((i64::from(self.x) & 0x3FF_FFFF) << 38)
            | ((i64::from(self.z) & 0x3FF_FFFF) << 12)
            | (i64::from(self.y) & 0xFFF)
    }

    pub fn from_packed(packed: i64) -> Self {
        Self {
            x: (packed >> 38) as i32,
            y: ((packed << 52) >> 52) as i32,
            z: ((packed << 26) >> 38) as i32,
        }
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Block position qualified by the dimension it is in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionBlockPosition {
    pub dimension: Identifier,
    pub position: BlockPosition,
}

impl DimensionBlockPosition {
    pub fn new(dimension: Identifier, position: BlockPosition) -> Self {
        Self {
            dimension,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // ==========================================================================
    // Block position packing
    // ==========================================================================

    #[test]
    fn test_packed_layout() {
        // x=18357644, y=831, z=-20882616 from the protocol documentation
        let packed = 0b01000110000001110110001100_10110000010101101101001000_001100111111_i64;
        let position = BlockPosition::from_packed(packed);
        assert_eq!(position, BlockPosition::new(18357644, 831, -20882616));
        assert_eq!(position.to_packed(), packed);
    }

    #[test_case(0, 0, 0)]
    #[test_case(-1, -1, -1)]
    #[test_case(33554431, 2047, 33554431 ; "maximum")]
    #[test_case(-33554432, -2048, -33554432 ; "minimum")]
    #[test_case(100, -64, -200 ; "below zero y")]
    fn test_packing_preserves_coordinates(x: i32, y: i32, z: i32) {
        let position = BlockPosition::new(x, y, z);
        assert_eq!(BlockPosition::from_packed(position.to_packed()), position);
    }

    // ==========================================================================
    // Angles
    // ==========================================================================

    #[test_case(0.0, 0)]
    #[test_case(90.0, 64)]
    #[test_case(180.0, -128)]
    #[test_case(-90.0, -64)]
    fn test_angle_from_degrees(degrees: f32, expected: i8) {
        assert_eq!(Direction::angle_from_degrees(degrees), expected);
    }

    #[test]
    fn test_angle_to_degrees() {
        assert_eq!(Direction::angle_to_degrees(64), 90.0);
        assert_eq!(Direction::angle_to_degrees(-128), 180.0);
    }

    #[test]
    fn test_velocity_blocks_per_tick() {
        let velocity = Velocity::new(8000, -4000, 0);
        assert_eq!(velocity.blocks_per_tick(), (1.0, -0.5, 0.0));
    }
}
