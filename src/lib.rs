//! # Diorite
//!
//! A Minecraft Java Edition protocol library and headless client, speaking
//! protocol 758 (1.18.2).
//!
//! ## Module Structure
//!
//! ```text
//! diorite/
//! +-- client/          Connection runtime, login and server list ping
//! +-- config/          Configuration management
//! +-- infrastructure/  Prometheus metrics
//! +-- protocol/        Wire primitives, NBT, packets, registries and framing
//! +-- shared/          Common utilities (errors, validation, release channel)
//! +-- world/           Identifiers, positions and other value types
//! ```

#[macro_use]
mod macros;

// Client runtime
pub mod client;

// Configuration module
pub mod config;

// Metrics
pub mod infrastructure;

// Protocol wire format
pub mod protocol;

// Shared utilities
pub mod shared;

// Application startup for the binary
pub mod startup;

// Telemetry and observability
pub mod telemetry;

// World value types
pub mod world;

pub use client::{Client, ClientBuilder};
