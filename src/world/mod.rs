//! World Model
//!
//! Value types shared by the protocol and client layers: identifiers,
//! positions, directions and dimensions.

pub mod dimension;
pub mod direction;
pub mod game;
pub mod identifier;
pub mod position;

pub use dimension::Dimension;
pub use direction::{BlockFace, CardinalDirection};
pub use game::{Difficulty, Gamemode, Hand};
pub use identifier::Identifier;
pub use position::{BlockPosition, Direction, DimensionBlockPosition, Position, Velocity};
