//! UI state shared between the controller and the renderer.

use std::time::Instant;

use egui::Color32;

use crate::speakers::SpeakerId;
use crate::transcript::TranscriptLine;

use super::ui::style::{self, StatusTone};

/// Aggregated UI state the renderer draws from.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Bottom status bar.
    pub status: StatusBarState,
    /// Speaker name panel.
    pub panel: SpeakerPanelState,
    /// Central transcript view.
    pub transcript: TranscriptViewState,
    /// Failed-request banner, shown until dismissed.
    pub notice: Option<SyncErrorNotice>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            panel: SpeakerPanelState::default(),
            transcript: TranscriptViewState::default(),
            notice: None,
        }
    }
}

/// Bottom status bar contents.
#[derive(Clone, Debug)]
pub struct StatusBarState {
    /// Status message.
    pub text: String,
    /// Short label next to the status dot.
    pub badge_label: String,
    /// Color of the status dot.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Initial, idle status bar.
    pub fn idle() -> Self {
        Self {
            text: "Ready".to_string(),
            badge_label: "Idle".to_string(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }
}

/// Speaker panel: editable rows plus any open prompt.
#[derive(Clone, Debug, Default)]
pub struct SpeakerPanelState {
    /// Whether the side panel is shown.
    pub open: bool,
    /// One row per displayed identifier, ascending.
    pub rows: Vec<SpeakerRowState>,
    /// Blocking prompt, if one is open.
    pub prompt: Option<PanelPrompt>,
    /// Whether a snapshot fetch is running.
    pub loading: bool,
}

/// One editable row bound to a fixed identifier.
#[derive(Clone, Debug)]
pub struct SpeakerRowState {
    /// Identifier the row edits.
    pub id: SpeakerId,
    /// Current contents of the name field.
    pub name_input: String,
    /// While set, the row's save control shows its success flash.
    pub saved_flash_until: Option<Instant>,
}

impl SpeakerRowState {
    /// Row editing `id`, pre-filled with `name`.
    pub fn new(id: SpeakerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name_input: name.into(),
            saved_flash_until: None,
        }
    }
}

/// Blocking prompts raised by panel operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelPrompt {
    /// Save was attempted with an empty name.
    MissingName {
        /// Row the save came from.
        id: SpeakerId,
    },
    /// Clearing every stored name needs confirmation first.
    ConfirmClearAll,
}

/// Dismissible description of a failed store request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncErrorNotice {
    /// What the app was doing, e.g. "Saving the name for speaker 3".
    pub context: String,
    /// Error detail from the request.
    pub detail: String,
}

/// Central transcript view contents.
#[derive(Clone, Debug)]
pub struct TranscriptViewState {
    /// Rendered lines, oldest first.
    pub lines: Vec<TranscriptLine>,
    /// Keep the view pinned to the newest line.
    pub autoscroll: bool,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            autoscroll: true,
        }
    }
}
