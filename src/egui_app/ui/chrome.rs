//! Top bar, status bar, and the failed-request banner.

use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Castlist").strong().size(18.0));
                    ui.label(
                        RichText::new("speaker names for live transcripts")
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                        let open_server = ui
                            .button("Open server")
                            .on_hover_text(self.controller.server_base_url());
                        if open_server.clicked() {
                            self.controller.open_server_page();
                        }
                        let toggle_label = if self.controller.ui.panel.open {
                            "Hide speakers"
                        } else {
                            "Speakers"
                        };
                        if ui.button(toggle_label).clicked() {
                            self.controller.toggle_speaker_panel();
                        }
                    });
                });
            });
    }

    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let status = self.controller.ui.status.clone();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(egui::Margin::symmetric(12, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let center = ui.cursor().min + egui::vec2(6.0, 9.0);
                    ui.painter().circle_filled(center, 5.0, status.badge_color);
                    ui.add_space(16.0);
                    ui.label(RichText::new(status.badge_label).strong());
                    ui.separator();
                    ui.label(status.text);
                });
            });
    }

    pub(super) fn render_notice_banner(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.ui.notice.clone() else {
            return;
        };
        let palette = style::palette();
        egui::TopBottomPanel::top("sync_notice")
            .frame(
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(62, 34, 31))
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} failed.", notice.context))
                            .color(palette.danger)
                            .strong(),
                    );
                    ui.add(egui::Label::new(RichText::new(notice.detail.clone())).truncate());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.controller.dismiss_sync_notice();
                        }
                    });
                });
            });
    }
}
