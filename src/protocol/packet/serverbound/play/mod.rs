//! Serverbound play packets.

mod blocks;
mod inventory;
mod misc;
mod movement;
mod player;

pub use blocks::*;
pub use inventory::*;
pub use misc::*;
pub use movement::*;
pub use player::*;
