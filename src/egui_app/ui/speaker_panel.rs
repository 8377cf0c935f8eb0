//! Speaker name panel: editable rows synced to the store.

use eframe::egui::{self, RichText};

use crate::speakers::SpeakerId;

use super::EguiApp;
use super::style;

impl EguiApp {
    pub(super) fn render_speaker_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Speakers").strong().size(15.0));
            if self.controller.ui.panel.loading {
                ui.add(egui::Spinner::new().size(14.0));
            }
        });
        ui.label(
            RichText::new("Names apply to every matching transcript badge.")
                .color(palette.text_muted)
                .small(),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let loading = self.controller.ui.panel.loading;
            if ui
                .add_enabled(!loading, egui::Button::new("Reload"))
                .clicked()
            {
                self.controller.reload_speakers();
            }
            if ui.button("Add speaker").clicked() {
                self.controller.add_speaker_row();
            }
            if ui.button("Clear all").clicked() {
                self.controller.request_clear_all_names();
            }
        });
        ui.add_space(6.0);
        ui.separator();

        let mut save_clicked: Option<SpeakerId> = None;
        let mut remove_clicked: Option<SpeakerId> = None;
        egui::ScrollArea::vertical()
            .id_salt("speaker_rows")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in 0..self.controller.ui.panel.rows.len() {
                    let (id, flash_active, pending) = {
                        let row = &self.controller.ui.panel.rows[index];
                        (
                            row.id,
                            row.saved_flash_until.is_some(),
                            self.controller.is_mutation_pending(row.id),
                        )
                    };
                    ui.horizontal(|ui| {
                        badge_chip(ui, id);
                        let field = egui::TextEdit::singleline(
                            &mut self.controller.ui.panel.rows[index].name_input,
                        )
                        .hint_text("Enter name (e.g., Alice)")
                        .desired_width(150.0);
                        let response = ui.add(field);
                        let submitted = response.lost_focus()
                            && ui.input(|input| input.key_pressed(egui::Key::Enter));
                        let save_label = if flash_active { "✓" } else { "Save" };
                        let save = ui.add_enabled(!pending, egui::Button::new(save_label));
                        if save.clicked() || submitted {
                            save_clicked = Some(id);
                        }
                        let remove = ui
                            .add_enabled(!pending, egui::Button::new("✕"))
                            .on_hover_text("Remove stored name");
                        if remove.clicked() {
                            remove_clicked = Some(id);
                        }
                    });
                    ui.add_space(2.0);
                }
            });
        if let Some(id) = save_clicked {
            self.controller.save_speaker_name(id);
        }
        if let Some(id) = remove_clicked {
            self.controller.remove_speaker_name(id);
        }
    }
}

fn badge_chip(ui: &mut egui::Ui, id: SpeakerId) {
    let palette = style::palette();
    egui::Frame::new()
        .fill(style::speaker_fill(Some(id)))
        .inner_margin(egui::Margin::symmetric(7, 2))
        .show(ui, |ui| {
            ui.label(
                RichText::new(id.to_string())
                    .color(palette.bg_primary)
                    .strong()
                    .monospace(),
            );
        });
}
