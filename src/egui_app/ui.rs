//! egui renderer for the speaker panel and transcript view.

mod chrome;
mod prompts;
mod speaker_panel;
pub mod style;
mod transcript_view;

use eframe::egui;

use super::controller::EguiController;

/// Smallest window size the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::Vec2::new(760.0, 480.0);

/// Renders the egui UI over the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Build the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let mut controller = EguiController::new();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load configuration: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals_once(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals_once(ctx);
        self.controller.tick();

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        self.render_notice_banner(ctx);
        if self.controller.ui.panel.open {
            egui::SidePanel::left("speaker_panel")
                .resizable(false)
                .default_width(330.0)
                .show(ctx, |ui| self.render_speaker_panel(ui));
        }
        egui::CentralPanel::default().show(ctx, |ui| self.render_transcript_view(ui));
        self.render_panel_prompts(ctx);

        // Background jobs and flash expiry land without user input.
        ctx.request_repaint_after(std::time::Duration::from_millis(120));
    }
}
