//! Speaker panel and transcript operations.

use crate::egui_app::state::{PanelPrompt, SpeakerRowState};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::speakers::SpeakerId;
use crate::transcript::{self, TranscriptLine};

use super::EguiController;

impl EguiController {
    /// Show or hide the speaker panel. The first transition to visible
    /// fetches the stored names.
    pub fn toggle_speaker_panel(&mut self) {
        self.ui.panel.open = !self.ui.panel.open;
        if self.ui.panel.open && !self.loaded_once {
            self.reload_speakers();
        }
    }

    /// Fetch the stored mapping; on success the cache is replaced and the
    /// rows re-rendered. Redundant calls while a fetch runs are ignored.
    pub fn reload_speakers(&mut self) {
        self.loaded_once = true;
        if !self.jobs.begin_load(self.config.server.base_url.clone()) {
            return;
        }
        self.ui.panel.loading = true;
        self.set_status("Loading speaker names...", StatusTone::Busy);
    }

    /// Append one unsaved row for the next free identifier.
    pub fn add_speaker_row(&mut self) {
        let displayed: Vec<SpeakerId> = self.ui.panel.rows.iter().map(|row| row.id).collect();
        let id = view_model::next_row_id(&displayed);
        self.ui.panel.rows.push(SpeakerRowState::new(id, String::new()));
    }

    /// Persist the name typed into the row for `id`. Empty names raise the
    /// validation prompt without touching the network; the cache is updated
    /// only once the request succeeds.
    pub fn save_speaker_name(&mut self, id: SpeakerId) {
        let Some(row) = self.ui.panel.rows.iter().find(|row| row.id == id) else {
            return;
        };
        let name = row.name_input.trim().to_string();
        if name.is_empty() {
            self.ui.panel.prompt = Some(PanelPrompt::MissingName { id });
            return;
        }
        if !self
            .jobs
            .begin_save(self.config.server.base_url.clone(), id, name)
        {
            self.set_status(
                format!("A request for speaker {id} is still running"),
                StatusTone::Warning,
            );
            return;
        }
        self.set_status(format!("Saving name for speaker {id}..."), StatusTone::Busy);
    }

    /// Delete the stored name for `id`. The cache entry and the row input
    /// are cleared once the request succeeds.
    pub fn remove_speaker_name(&mut self, id: SpeakerId) {
        if !self
            .jobs
            .begin_remove(self.config.server.base_url.clone(), id)
        {
            self.set_status(
                format!("A request for speaker {id} is still running"),
                StatusTone::Warning,
            );
            return;
        }
        self.set_status(
            format!("Removing name for speaker {id}..."),
            StatusTone::Busy,
        );
    }

    /// Ask for confirmation before deleting every stored name.
    pub fn request_clear_all_names(&mut self) {
        self.ui.panel.prompt = Some(PanelPrompt::ConfirmClearAll);
    }

    /// Confirmed bulk delete. The cache and rows reset once the request
    /// succeeds; completions of older per-identifier mutations are then
    /// stale and get discarded.
    pub fn confirm_clear_all_names(&mut self) {
        self.ui.panel.prompt = None;
        if !self.jobs.begin_clear(self.config.server.base_url.clone()) {
            return;
        }
        self.set_status("Clearing all speaker names...", StatusTone::Busy);
    }

    /// Close the open prompt without acting on it.
    pub fn close_panel_prompt(&mut self) {
        self.ui.panel.prompt = None;
    }

    /// Drop the failed-request banner.
    pub fn dismiss_sync_notice(&mut self) {
        self.ui.notice = None;
    }

    /// Relabel every transcript badge from the current cache.
    pub fn refresh_transcript_names(&mut self) {
        transcript::apply_names(&mut self.ui.transcript.lines, &self.roster);
    }

    /// Append a transcript line, labeling its badge from the current cache.
    pub fn push_transcript_line(&mut self, speaker: Option<SpeakerId>, text: impl Into<String>) {
        let line = match speaker {
            Some(id) => TranscriptLine::spoken(id, &self.roster, text),
            None => TranscriptLine::unattributed(text),
        };
        self.ui.transcript.lines.push(line);
    }

    /// Open the configured server page in the default browser.
    pub fn open_server_page(&mut self) {
        let url = self.config.server.base_url.clone();
        if let Err(err) = open::that(&url) {
            self.set_status(format!("Failed to open {url}: {err}"), StatusTone::Warning);
        }
    }
}
