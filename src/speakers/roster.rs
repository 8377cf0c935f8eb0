//! Speaker identifiers and the in-memory name cache.

use std::collections::BTreeMap;
use std::fmt;

/// Positive numeric label the transcription pipeline assigns to a voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeakerId(u32);

impl SpeakerId {
    /// Lowest valid identifier.
    pub const FIRST: SpeakerId = SpeakerId(1);

    /// Build an identifier from a raw value. Zero is not a speaker.
    pub fn new(raw: u32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Parse the leading decimal digits of `text`, ignoring leading
    /// whitespace. `"7"` and `"7 (cont.)"` both yield 7; `"Alice"` yields
    /// nothing.
    pub fn parse_leading(text: &str) -> Option<Self> {
        let trimmed = text.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..end].parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory cache of speaker display names, keyed by identifier.
///
/// Mirrors the server-side store. Mutations are applied here only after the
/// corresponding request succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeakerRoster {
    names: BTreeMap<SpeakerId, String>,
}

impl SpeakerRoster {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a store snapshot into the cache. The server value wins for every
    /// identifier it carries; entries committed locally while the snapshot
    /// was in flight survive.
    pub fn merge_from(&mut self, snapshot: BTreeMap<SpeakerId, String>) {
        for (id, name) in snapshot {
            self.names.insert(id, name);
        }
    }

    /// Store or overwrite the name for one identifier.
    pub fn set_name(&mut self, id: SpeakerId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// Drop the stored name for one identifier. Unknown identifiers are a
    /// no-op; returns whether an entry was removed.
    pub fn remove(&mut self, id: SpeakerId) -> bool {
        self.names.remove(&id).is_some()
    }

    /// Drop every stored name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// The stored name for an identifier, if any.
    pub fn name_for(&self, id: SpeakerId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Whether no names are stored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Stored entries in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeakerId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}
