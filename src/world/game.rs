//! Game modes, difficulty and hands.

wire_enum! {
    pub enum Gamemode {
        Survival = 0,
        Creative = 1,
        Adventure = 2,
        Spectator = 3,
    }
}

wire_enum! {
    pub enum Difficulty {
        Peaceful = 0,
        Easy = 1,
        Normal = 2,
        Hard = 3,
    }
}

wire_enum! {
    /// Hand holding the item used in an interaction
    pub enum Hand {
        MainHand = 0,
        OffHand = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::io::WireEnum;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hand_ids() {
        assert_eq!(Hand::MainHand.id(), 0);
        assert_eq!(Hand::from_id(1), Some(Hand::OffHand));
        assert_eq!(Hand::from_id(2), None);
    }

    #[test]
    fn test_gamemode_ids() {
        assert_eq!(Gamemode::from_id(3), Some(Gamemode::Spectator));
        assert_eq!(Difficulty::Hard.id(), 3);
    }
}
