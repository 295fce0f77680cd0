//! Cassettes: recorded upstream traffic for offline replay.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, CassetteError, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
