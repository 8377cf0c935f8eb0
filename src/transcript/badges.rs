//! Speaker badges attached to transcript lines.
//!
//! A badge shows the bare numeric identifier until a name is stored for it;
//! then it shows the name and moves the numeric identity into hover text.

use crate::speakers::{SpeakerId, SpeakerRoster};

/// One speaker badge rendered at the head of a transcript line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeakerBadge {
    /// Explicit identifier binding. Authoritative when present.
    pub speaker: Option<SpeakerId>,
    /// Visible badge text.
    pub label: String,
    /// Hover text. Carries the numeric identity while a name is shown,
    /// empty otherwise.
    pub hover: String,
}

impl SpeakerBadge {
    /// Badge bound to a known identifier, labeled per the roster.
    pub fn bound(id: SpeakerId, roster: &SpeakerRoster) -> Self {
        let mut badge = Self {
            speaker: Some(id),
            label: id.to_string(),
            hover: String::new(),
        };
        badge.relabel(roster);
        badge
    }

    /// Badge carrying only display text, as produced by feeds that do not
    /// attach identifier metadata.
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            speaker: None,
            label: label.into(),
            hover: String::new(),
        }
    }

    /// The identifier this badge refers to: the explicit binding when
    /// present, otherwise whatever leading digits the label carries.
    pub fn identifier(&self) -> Option<SpeakerId> {
        self.speaker
            .or_else(|| SpeakerId::parse_leading(&self.label))
    }

    /// Rewrite label and hover text from the roster, keeping the resolved
    /// identifier as the badge's binding. A badge that resolved through its
    /// label stays addressable after the digits are replaced by a name.
    /// Badges without a resolvable identifier are left untouched.
    pub fn relabel(&mut self, roster: &SpeakerRoster) {
        let Some(id) = self.identifier() else {
            return;
        };
        self.speaker = Some(id);
        match roster.name_for(id) {
            Some(name) => {
                self.label = name.to_string();
                self.hover = format!("Speaker {id}");
            }
            None => {
                self.label = id.to_string();
                self.hover.clear();
            }
        }
    }
}

/// One rendered transcript line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Badge naming who spoke, when the feed attributed the line.
    pub badge: Option<SpeakerBadge>,
    /// Spoken text.
    pub text: String,
}

impl TranscriptLine {
    /// Line attributed to a speaker.
    pub fn spoken(id: SpeakerId, roster: &SpeakerRoster, text: impl Into<String>) -> Self {
        Self {
            badge: Some(SpeakerBadge::bound(id, roster)),
            text: text.into(),
        }
    }

    /// Line without speaker attribution.
    pub fn unattributed(text: impl Into<String>) -> Self {
        Self {
            badge: None,
            text: text.into(),
        }
    }
}

/// Relabel every badge in `lines` from the roster.
pub fn apply_names(lines: &mut [TranscriptLine], roster: &SpeakerRoster) {
    for line in lines {
        if let Some(badge) = line.badge.as_mut() {
            badge.relabel(roster);
        }
    }
}
