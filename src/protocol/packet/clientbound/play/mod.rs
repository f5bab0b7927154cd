//! Clientbound play packets.

mod border;
mod chat;
mod entity;
mod inventory;
mod misc;
mod player;
mod scoreboard;
mod sound;
mod world;

pub use border::*;
pub use chat::*;
pub use entity::*;
pub use inventory::*;
pub use misc::*;
pub use player::*;
pub use scoreboard::*;
pub use sound::*;
pub use world::*;
