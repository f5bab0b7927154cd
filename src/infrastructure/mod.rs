//! Infrastructure Layer
//!
//! Process-wide services outside the protocol itself.

pub mod metrics;
