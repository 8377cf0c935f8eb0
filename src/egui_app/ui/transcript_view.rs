//! Central transcript view with speaker badges.

use eframe::egui::{self, RichText};

use crate::transcript::SpeakerBadge;

use super::EguiApp;
use super::style;

impl EguiApp {
    pub(super) fn render_transcript_view(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Transcript").strong().size(15.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.controller.ui.transcript.autoscroll, "Auto-scroll");
            });
        });
        ui.add_space(4.0);
        if self.controller.ui.transcript.lines.is_empty() {
            ui.label(
                RichText::new("Transcript lines appear here once the feed is connected.")
                    .color(palette.text_muted),
            );
            return;
        }
        let autoscroll = self.controller.ui.transcript.autoscroll;
        egui::ScrollArea::vertical()
            .id_salt("transcript_lines")
            .auto_shrink([false, false])
            .stick_to_bottom(autoscroll)
            .show(ui, |ui| {
                for line in &self.controller.ui.transcript.lines {
                    ui.horizontal_wrapped(|ui| {
                        if let Some(badge) = &line.badge {
                            badge_label(ui, badge);
                        }
                        ui.label(&line.text);
                    });
                }
            });
    }
}

fn badge_label(ui: &mut egui::Ui, badge: &SpeakerBadge) {
    let palette = style::palette();
    let fill = style::speaker_fill(badge.identifier());
    let response = egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(
                RichText::new(&badge.label)
                    .color(palette.bg_primary)
                    .strong()
                    .small(),
            );
        })
        .response;
    if !badge.hover.is_empty() {
        response.on_hover_text(&badge.hover);
    }
}
