//! Block faces and cardinal directions.

wire_enum! {
    /// Face of a block targeted by digging or placement
    pub enum BlockFace {
        Bottom = 0,
        Top = 1,
        North = 2,
        South = 3,
        West = 4,
        East = 5,
    }
}

impl BlockFace {
    /// Unit offset pointing out of this face
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            BlockFace::Bottom => (0, -1, 0),
            BlockFace::Top => (0, 1, 0),
            BlockFace::North => (0, 0, -1),
            BlockFace::South => (0, 0, 1),
            BlockFace::West => (-1, 0, 0),
            BlockFace::East => (1, 0, 0),
        }
    }
}

wire_enum! {
    /// Horizontal facing, used by paintings
    pub enum CardinalDirection {
        South = 0,
        West = 1,
        North = 2,
        East = 3,
    }
}

impl CardinalDirection {
    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::East => CardinalDirection::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::io::WireEnum;

    #[test]
    fn test_block_face_ids() {
        assert_eq!(BlockFace::from_id(0), Some(BlockFace::Bottom));
        assert_eq!(BlockFace::from_id(5), Some(BlockFace::East));
        assert_eq!(BlockFace::from_id(6), None);
        assert_eq!(BlockFace::North.id(), 2);
    }

    #[test]
    fn test_opposite_faces_cancel() {
        let (x, y, z) = BlockFace::West.offset();
        let (ox, oy, oz) = BlockFace::East.offset();
        assert_eq!((x + ox, y + oy, z + oz), (0, 0, 0));
    }

    #[test]
    fn test_cardinal_opposite() {
        assert_eq!(CardinalDirection::South.opposite(), CardinalDirection::North);
        assert_eq!(CardinalDirection::East.opposite().opposite(), CardinalDirection::East);
    }
}
