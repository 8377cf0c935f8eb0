//! Speaker name domain: the in-memory roster and the REST store client.

pub mod api;
pub mod roster;

pub use roster::{SpeakerId, SpeakerRoster};
