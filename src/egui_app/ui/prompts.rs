//! Blocking prompts raised by the speaker panel.

use eframe::egui::{self, Align2, RichText};

use crate::egui_app::state::PanelPrompt;
use crate::speakers::SpeakerId;

use super::EguiApp;
use super::style;

impl EguiApp {
    pub(super) fn render_panel_prompts(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.controller.ui.panel.prompt.clone() else {
            return;
        };
        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            self.controller.close_panel_prompt();
            return;
        }
        match prompt {
            PanelPrompt::MissingName { id } => self.render_missing_name_prompt(ctx, id),
            PanelPrompt::ConfirmClearAll => self.render_clear_all_prompt(ctx),
        }
    }

    fn render_missing_name_prompt(&mut self, ctx: &egui::Context, id: SpeakerId) {
        let mut open = true;
        egui::Window::new("Name required")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("Please enter a name for speaker {id}."));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.controller.close_panel_prompt();
                }
            });
        if !open {
            self.controller.close_panel_prompt();
        }
    }

    fn render_clear_all_prompt(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let mut open = true;
        egui::Window::new("Clear all speaker names?")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Every stored name reverts to its numeric identifier.");
                ui.label(
                    RichText::new("The server's copy is cleared as well.")
                        .color(palette.text_muted)
                        .small(),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.controller.close_panel_prompt();
                    }
                    let clear = egui::Button::new(RichText::new("Clear all").color(palette.danger));
                    if ui.add(clear).clicked() {
                        self.controller.confirm_clear_all_names();
                    }
                });
            });
        if !open {
            self.controller.close_panel_prompt();
        }
    }
}
