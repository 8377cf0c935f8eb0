//! Transcript lines and the speaker badges rendered with them.

pub mod badges;

pub use badges::{SpeakerBadge, TranscriptLine, apply_names};
