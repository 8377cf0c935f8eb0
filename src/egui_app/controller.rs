//! Controller owning the roster, transcript, and UI state.
//!
//! The renderer calls operation methods on [`EguiController`] and reads
//! [`EguiController::ui`] back every frame. Store requests run on worker
//! threads; their completions are drained by [`EguiController::tick`].

mod background_jobs;
mod jobs;
mod panel;

use std::time::{Duration, Instant};

use egui::Color32;

use crate::config::{self, AppConfig};
use crate::speakers::{SpeakerId, SpeakerRoster};

use super::state::{SpeakerRowState, UiState};
use super::ui::style::{self, StatusTone};
use super::view_model;

/// How long a row's save control shows its success flash.
pub(crate) const SAVE_FLASH_DURATION: Duration = Duration::from_secs(1);

/// Owns application state and serves the egui renderer.
pub struct EguiController {
    /// UI-facing state, rendered every frame.
    pub ui: UiState,
    config: AppConfig,
    roster: SpeakerRoster,
    jobs: jobs::ControllerJobs,
    loaded_once: bool,
}

impl EguiController {
    /// Controller with default configuration. Production code follows up
    /// with [`load_configuration`](Self::load_configuration).
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Controller with explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            config,
            roster: SpeakerRoster::new(),
            jobs: jobs::ControllerJobs::new(),
            loaded_once: false,
        };
        controller.rebuild_panel_rows();
        controller
    }

    /// Load the persisted configuration. When configured to autoload, the
    /// panel opens and the stored names are fetched right away.
    pub fn load_configuration(&mut self) -> Result<(), config::ConfigError> {
        self.config = config::load_or_default()?;
        if self.config.panel.autoload {
            self.ui.panel.open = true;
            self.reload_speakers();
        }
        Ok(())
    }

    /// Advance per-frame work: drain finished background jobs and expire
    /// transient row indications.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
        self.expire_save_flashes(Instant::now());
    }

    /// Base URL of the configured transcription server.
    pub fn server_base_url(&self) -> &str {
        &self.config.server.base_url
    }

    /// Read view of the name cache.
    pub fn roster(&self) -> &SpeakerRoster {
        &self.roster
    }

    /// Whether a save or remove request for `id` is still outstanding.
    pub fn is_mutation_pending(&self, id: SpeakerId) -> bool {
        self.jobs.mutation_in_flight(id)
    }

    /// Whether any store request is still outstanding.
    pub fn any_request_pending(&self) -> bool {
        self.jobs.any_in_flight()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label.to_string();
        self.ui.status.badge_color = color;
    }

    fn rebuild_panel_rows(&mut self) {
        self.ui.panel.rows = view_model::panel_rows(&self.roster)
            .into_iter()
            .map(|row| SpeakerRowState::new(row.id, row.name))
            .collect();
    }

    fn expire_save_flashes(&mut self, now: Instant) {
        for row in &mut self.ui.panel.rows {
            if row.saved_flash_until.is_some_and(|until| now >= until) {
                row.saved_flash_until = None;
            }
        }
    }
}

impl Default for EguiController {
    fn default() -> Self {
        Self::new()
    }
}

fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    let label = match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Syncing",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    };
    (label, style::status_badge_color(tone))
}
