//! Applies finished background jobs to controller state.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use crate::egui_app::state::SyncErrorNotice;
use crate::egui_app::ui::style::StatusTone;
use crate::speakers::api::SpeakerStoreError;

use super::jobs::{ClearOutcome, JobMessage, LoadOutcome, RemoveOutcome, SaveOutcome};
use super::{EguiController, SAVE_FLASH_DURATION};

impl EguiController {
    pub(super) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            match message {
                JobMessage::SpeakersLoaded(outcome) => self.finish_load(outcome),
                JobMessage::NameSaved(outcome) => self.finish_save(outcome),
                JobMessage::NameRemoved(outcome) => self.finish_remove(outcome),
                JobMessage::StoreCleared(outcome) => self.finish_clear(outcome),
            }
        }
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        if !self.jobs.accept_load(outcome.token) {
            tracing::debug!("Discarding stale snapshot completion");
            return;
        }
        self.ui.panel.loading = false;
        match outcome.result {
            Ok(snapshot) => {
                let count = snapshot.len();
                self.roster.merge_from(snapshot);
                self.rebuild_panel_rows();
                self.refresh_transcript_names();
                self.set_status(loaded_status(count), StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Speaker name load failed: {err}");
                self.report_sync_failure("Loading speaker names", &err);
            }
        }
    }

    fn finish_save(&mut self, outcome: SaveOutcome) {
        if !self.jobs.accept_mutation(outcome.id, outcome.token) {
            tracing::debug!("Discarding stale save completion for speaker {}", outcome.id);
            return;
        }
        match outcome.result {
            Ok(()) => {
                self.roster.set_name(outcome.id, outcome.name);
                if let Some(row) = self
                    .ui
                    .panel
                    .rows
                    .iter_mut()
                    .find(|row| row.id == outcome.id)
                {
                    row.saved_flash_until = Some(Instant::now() + SAVE_FLASH_DURATION);
                }
                self.refresh_transcript_names();
                self.set_status(
                    format!("Saved name for speaker {}", outcome.id),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("Saving name for speaker {} failed: {err}", outcome.id);
                self.report_sync_failure(
                    format!("Saving the name for speaker {}", outcome.id),
                    &err,
                );
            }
        }
    }

    fn finish_remove(&mut self, outcome: RemoveOutcome) {
        if !self.jobs.accept_mutation(outcome.id, outcome.token) {
            tracing::debug!(
                "Discarding stale remove completion for speaker {}",
                outcome.id
            );
            return;
        }
        match outcome.result {
            Ok(()) => {
                self.roster.remove(outcome.id);
                if let Some(row) = self
                    .ui
                    .panel
                    .rows
                    .iter_mut()
                    .find(|row| row.id == outcome.id)
                {
                    row.name_input.clear();
                    row.saved_flash_until = None;
                }
                self.refresh_transcript_names();
                self.set_status(
                    format!("Removed name for speaker {}", outcome.id),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("Removing name for speaker {} failed: {err}", outcome.id);
                self.report_sync_failure(
                    format!("Removing the name for speaker {}", outcome.id),
                    &err,
                );
            }
        }
    }

    fn finish_clear(&mut self, outcome: ClearOutcome) {
        if !self.jobs.accept_clear(outcome.token) {
            tracing::debug!("Discarding stale clear completion");
            return;
        }
        match outcome.result {
            Ok(()) => {
                // Older per-identifier mutations now race against an empty
                // store; their completions must not repopulate the cache.
                self.jobs.invalidate_mutations();
                self.roster.clear();
                self.rebuild_panel_rows();
                self.refresh_transcript_names();
                self.set_status("All speaker names cleared", StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Clearing speaker names failed: {err}");
                self.report_sync_failure("Clearing all speaker names", &err);
            }
        }
    }

    fn report_sync_failure(&mut self, context: impl Into<String>, err: &SpeakerStoreError) {
        let context = context.into();
        self.set_status(format!("{context} failed: {err}"), StatusTone::Error);
        self.ui.notice = Some(SyncErrorNotice {
            context,
            detail: err.to_string(),
        });
    }
}

fn loaded_status(count: usize) -> String {
    match count {
        0 => "No speaker names stored yet".to_string(),
        1 => "Loaded 1 speaker name".to_string(),
        n => format!("Loaded {n} speaker names"),
    }
}
