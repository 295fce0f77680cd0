//! Adapter implementations for port traits.
//!
//! - `live`: real network access.
//! - `recording`: wraps another adapter and captures every interaction.
//! - `replaying`: serves captured interactions from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
