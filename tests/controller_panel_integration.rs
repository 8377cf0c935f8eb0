//! Controller-level integration tests driving the speaker panel against an
//! in-process stub of the name store.

mod support;

use std::thread;
use std::time::{Duration, Instant};

use castlist::config::{self, AppConfig};
use castlist::egui_app::controller::EguiController;
use castlist::egui_app::state::PanelPrompt;
use castlist::speakers::SpeakerId;
use castlist::transcript::{SpeakerBadge, TranscriptLine};
use tempfile::TempDir;

use support::castlist_env::EnvGuard;
use support::stub_server::SpeakerStoreStub;

const WAIT_BUDGET: Duration = Duration::from_secs(5);

struct PanelHarness {
    stub: SpeakerStoreStub,
    controller: EguiController,
    _env: EnvGuard,
    _temp: TempDir,
}

impl PanelHarness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp config home");
        let env = EnvGuard::set_config_home(temp.path());
        let stub = SpeakerStoreStub::start();
        let mut config = AppConfig::default();
        config.server.base_url = stub.base_url().to_string();
        let controller = EguiController::with_config(config);
        Self {
            stub,
            controller,
            _env: env,
            _temp: temp,
        }
    }

    fn row_ids(&self) -> Vec<u32> {
        self.controller
            .ui
            .panel
            .rows
            .iter()
            .map(|row| row.id.get())
            .collect()
    }

    fn row_input(&self, id: u32) -> &str {
        &self
            .controller
            .ui
            .panel
            .rows
            .iter()
            .find(|row| row.id == speaker(id))
            .expect("row present")
            .name_input
    }

    fn set_input(&mut self, id: u32, text: &str) {
        let row = self
            .controller
            .ui
            .panel
            .rows
            .iter_mut()
            .find(|row| row.id == speaker(id))
            .expect("row present");
        row.name_input = text.to_string();
    }
}

fn speaker(raw: u32) -> SpeakerId {
    SpeakerId::new(raw).expect("positive id")
}

fn wait_until(controller: &mut EguiController, mut done: impl FnMut(&EguiController) -> bool) {
    let deadline = Instant::now() + WAIT_BUDGET;
    while Instant::now() < deadline {
        controller.tick();
        if done(controller) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for a background job");
}

fn settle(controller: &mut EguiController) {
    wait_until(controller, |controller| {
        !controller.any_request_pending() && !controller.ui.panel.loading
    });
}

#[test]
fn startup_autoload_opens_the_panel_and_fetches_names() {
    let temp = tempfile::tempdir().expect("create temp config home");
    let _env = EnvGuard::set_config_home(temp.path());
    let stub = SpeakerStoreStub::start();
    stub.insert_name(5, "Eve");
    let mut config = AppConfig::default();
    config.server.base_url = stub.base_url().to_string();
    config::save(&config).expect("write config");

    let mut controller = EguiController::new();
    controller.load_configuration().expect("load configuration");
    assert!(controller.ui.panel.open);

    settle(&mut controller);
    assert_eq!(stub.request_count(), 1);
    assert_eq!(controller.roster().name_for(speaker(5)), Some("Eve"));
}

#[test]
fn startup_without_autoload_leaves_the_panel_closed() {
    let temp = tempfile::tempdir().expect("create temp config home");
    let _env = EnvGuard::set_config_home(temp.path());
    let stub = SpeakerStoreStub::start();
    let mut config = AppConfig::default();
    config.server.base_url = stub.base_url().to_string();
    config.panel.autoload = false;
    config::save(&config).expect("write config");

    let mut controller = EguiController::new();
    controller.load_configuration().expect("load configuration");

    assert!(!controller.ui.panel.open);
    assert!(!controller.any_request_pending());
    assert_eq!(stub.request_count(), 0);
    assert!(controller.roster().is_empty());
}

#[test]
fn reopening_the_panel_does_not_fetch_again() {
    let mut harness = PanelHarness::new();
    assert!(!harness.controller.ui.panel.open);

    harness.controller.toggle_speaker_panel();
    assert!(harness.controller.ui.panel.open);
    settle(&mut harness.controller);
    assert_eq!(harness.stub.request_count(), 1);

    harness.controller.toggle_speaker_panel();
    assert!(!harness.controller.ui.panel.open);
    harness.controller.toggle_speaker_panel();
    assert!(harness.controller.ui.panel.open);
    assert!(!harness.controller.any_request_pending());

    settle(&mut harness.controller);
    assert_eq!(harness.stub.request_count(), 1);
}

#[test]
fn empty_store_shows_four_placeholder_rows() {
    let mut harness = PanelHarness::new();
    harness.controller.reload_speakers();
    settle(&mut harness.controller);

    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);
    assert!(harness
        .controller
        .ui
        .panel
        .rows
        .iter()
        .all(|row| row.name_input.is_empty()));
    assert!(harness.controller.roster().is_empty());
}

#[test]
fn load_replaces_placeholder_rows_with_stored_entries() {
    let mut harness = PanelHarness::new();
    harness.stub.insert_name(7, "Gus");
    harness.stub.insert_name(2, "Bea");
    harness.controller.reload_speakers();
    settle(&mut harness.controller);

    assert_eq!(harness.row_ids(), vec![2, 7]);
    assert_eq!(harness.row_input(2), "Bea");
    assert_eq!(harness.row_input(7), "Gus");
    assert_eq!(harness.controller.roster().len(), 2);
}

#[test]
fn saving_a_name_trims_and_round_trips_through_the_store() {
    let mut harness = PanelHarness::new();
    harness.set_input(1, "  Alice  ");
    harness.controller.save_speaker_name(speaker(1));
    settle(&mut harness.controller);

    assert_eq!(harness.controller.roster().name_for(speaker(1)), Some("Alice"));
    assert_eq!(
        harness.stub.names().get(&1).map(String::as_str),
        Some("Alice")
    );
    // The row keeps whatever was typed; only the stored copy is trimmed.
    assert_eq!(harness.row_input(1), "  Alice  ");
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);

    harness.controller.reload_speakers();
    settle(&mut harness.controller);
    assert_eq!(harness.row_ids(), vec![1]);
    assert_eq!(harness.row_input(1), "Alice");
}

#[test]
fn save_flash_clears_after_its_window() {
    let mut harness = PanelHarness::new();
    harness.set_input(2, "Bea");
    harness.controller.save_speaker_name(speaker(2));
    settle(&mut harness.controller);

    let flash = harness
        .controller
        .ui
        .panel
        .rows
        .iter()
        .find(|row| row.id == speaker(2))
        .and_then(|row| row.saved_flash_until);
    assert!(flash.is_some());

    wait_until(&mut harness.controller, |controller| {
        controller
            .ui
            .panel
            .rows
            .iter()
            .find(|row| row.id == speaker(2))
            .is_some_and(|row| row.saved_flash_until.is_none())
    });
}

#[test]
fn blank_name_prompts_without_any_request() {
    let mut harness = PanelHarness::new();
    harness.set_input(3, "   ");
    harness.controller.save_speaker_name(speaker(3));

    assert_eq!(
        harness.controller.ui.panel.prompt,
        Some(PanelPrompt::MissingName { id: speaker(3) })
    );
    assert!(!harness.controller.any_request_pending());
    assert_eq!(harness.stub.request_count(), 0);
    assert!(harness.controller.roster().is_empty());

    harness.controller.close_panel_prompt();
    assert_eq!(harness.controller.ui.panel.prompt, None);
}

#[test]
fn add_row_picks_highest_displayed_plus_one() {
    let mut harness = PanelHarness::new();
    harness.controller.add_speaker_row();
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4, 5]);

    harness.stub.insert_name(1, "Ada");
    harness.stub.insert_name(3, "Cleo");
    harness.stub.insert_name(5, "Eve");
    harness.controller.reload_speakers();
    settle(&mut harness.controller);
    assert_eq!(harness.row_ids(), vec![1, 3, 5]);

    harness.controller.add_speaker_row();
    harness.controller.add_speaker_row();
    assert_eq!(harness.row_ids(), vec![1, 3, 5, 6, 7]);
    assert_eq!(harness.controller.roster().len(), 3);
}

#[test]
fn removing_a_name_clears_the_cache_entry_and_row_input() {
    let mut harness = PanelHarness::new();
    harness.stub.insert_name(3, "Cleo");
    harness.controller.reload_speakers();
    settle(&mut harness.controller);
    assert_eq!(harness.row_input(3), "Cleo");

    harness.controller.remove_speaker_name(speaker(3));
    settle(&mut harness.controller);

    assert!(harness.controller.roster().is_empty());
    assert!(harness.stub.names().is_empty());
    // The row itself stays available for retyping.
    assert_eq!(harness.row_ids(), vec![3]);
    assert_eq!(harness.row_input(3), "");

    harness.controller.reload_speakers();
    settle(&mut harness.controller);
    assert_eq!(harness.controller.roster().name_for(speaker(3)), None);
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);
}

#[test]
fn clear_all_waits_for_confirmation_then_resets_the_panel() {
    let mut harness = PanelHarness::new();
    harness.stub.insert_name(1, "Ada");
    harness.stub.insert_name(2, "Bea");
    harness.controller.reload_speakers();
    settle(&mut harness.controller);

    harness.controller.request_clear_all_names();
    assert_eq!(
        harness.controller.ui.panel.prompt,
        Some(PanelPrompt::ConfirmClearAll)
    );
    harness.controller.close_panel_prompt();
    assert_eq!(harness.stub.names().len(), 2);
    assert_eq!(harness.stub.request_count(), 1);

    harness.controller.request_clear_all_names();
    harness.controller.confirm_clear_all_names();
    assert_eq!(harness.controller.ui.panel.prompt, None);
    settle(&mut harness.controller);

    assert!(harness.controller.roster().is_empty());
    assert!(harness.stub.names().is_empty());
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);
}

#[test]
fn failed_save_leaves_cache_untouched_and_raises_notice() {
    let mut harness = PanelHarness::new();
    harness.stub.fail_next_request(500);
    harness.set_input(1, "Ada");
    harness.controller.save_speaker_name(speaker(1));
    settle(&mut harness.controller);

    assert_eq!(harness.controller.roster().name_for(speaker(1)), None);
    assert!(harness.stub.names().is_empty());

    let notice = harness.controller.ui.notice.clone().expect("notice raised");
    assert_eq!(notice.context, "Saving the name for speaker 1");
    assert!(notice.detail.contains("injected failure"));
    // The validation prompt is a different surface and must stay closed.
    assert_eq!(harness.controller.ui.panel.prompt, None);

    harness.controller.dismiss_sync_notice();
    assert!(harness.controller.ui.notice.is_none());
}

#[test]
fn load_failure_reports_a_dismissible_notice() {
    let mut harness = PanelHarness::new();
    harness.stub.fail_next_request(404);
    harness.controller.reload_speakers();
    settle(&mut harness.controller);

    let notice = harness.controller.ui.notice.clone().expect("notice raised");
    assert_eq!(notice.context, "Loading speaker names");
    // 4xx answers are final; only transport and 5xx failures retry.
    assert_eq!(harness.stub.request_count(), 1);
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);
    assert!(!harness.controller.ui.panel.loading);

    harness.controller.dismiss_sync_notice();
    assert!(harness.controller.ui.notice.is_none());
}

#[test]
fn second_save_for_same_speaker_is_refused_while_first_runs() {
    let mut harness = PanelHarness::new();
    harness.stub.delay_posts(Duration::from_millis(300));
    harness.set_input(1, "Ada");
    harness.controller.save_speaker_name(speaker(1));
    assert!(harness.controller.is_mutation_pending(speaker(1)));

    harness.set_input(1, "Bea");
    harness.controller.save_speaker_name(speaker(1));
    assert!(harness.controller.ui.status.text.contains("still running"));

    settle(&mut harness.controller);
    assert_eq!(harness.stub.post_count(), 1);
    assert_eq!(harness.controller.roster().name_for(speaker(1)), Some("Ada"));
    assert_eq!(
        harness.stub.names().get(&1).map(String::as_str),
        Some("Ada")
    );
}

#[test]
fn late_save_completion_after_clear_all_is_discarded() {
    let mut harness = PanelHarness::new();
    harness.stub.delay_posts(Duration::from_millis(400));
    harness.set_input(1, "Ada");
    harness.controller.save_speaker_name(speaker(1));

    harness.controller.request_clear_all_names();
    harness.controller.confirm_clear_all_names();
    settle(&mut harness.controller);
    assert_eq!(harness.controller.ui.status.text, "All speaker names cleared");

    // Wait for the held-back POST to land on the stub, then give the
    // controller ample time to see its completion.
    let deadline = Instant::now() + WAIT_BUDGET;
    while harness.stub.post_count() == 0 || harness.stub.names().is_empty() {
        assert!(Instant::now() < deadline, "delayed save never reached the stub");
        thread::sleep(Duration::from_millis(10));
    }
    for _ in 0..40 {
        harness.controller.tick();
        thread::sleep(Duration::from_millis(5));
    }

    assert!(harness.controller.roster().is_empty());
    assert_eq!(harness.row_ids(), vec![1, 2, 3, 4]);
    assert!(harness.controller.ui.notice.is_none());
    assert_eq!(harness.controller.ui.status.text, "All speaker names cleared");
}

#[test]
fn transcript_badges_follow_cache_changes() {
    let mut harness = PanelHarness::new();
    harness.stub.insert_name(2, "Bea");
    harness
        .controller
        .push_transcript_line(Some(speaker(2)), "hello there");
    harness.controller.push_transcript_line(None, "door closes");
    harness.controller.ui.transcript.lines.push(TranscriptLine {
        badge: Some(SpeakerBadge::from_label("2")),
        text: "mm-hm".to_string(),
    });

    let labels = |controller: &EguiController| -> Vec<String> {
        controller
            .ui
            .transcript
            .lines
            .iter()
            .filter_map(|line| line.badge.as_ref())
            .map(|badge| badge.label.clone())
            .collect()
    };
    assert_eq!(labels(&harness.controller), vec!["2", "2"]);

    harness.controller.reload_speakers();
    settle(&mut harness.controller);
    assert_eq!(labels(&harness.controller), vec!["Bea", "Bea"]);
    let bound = harness.controller.ui.transcript.lines[0]
        .badge
        .as_ref()
        .expect("badge");
    assert_eq!(bound.hover, "Speaker 2");

    let before = harness.controller.ui.transcript.lines.clone();
    harness.controller.refresh_transcript_names();
    assert_eq!(harness.controller.ui.transcript.lines, before);

    harness.controller.remove_speaker_name(speaker(2));
    settle(&mut harness.controller);
    assert_eq!(labels(&harness.controller), vec!["2", "2"]);
}
