//! Shared colors and visual tweaks for the egui UI.

use egui::{Color32, CornerRadius, Shadow, Visuals};

use crate::speakers::SpeakerId;

/// Fixed color palette for the dark UI.
pub struct Palette {
    /// Window chrome and the darkest fills.
    pub bg_primary: Color32,
    /// Panel background.
    pub bg_secondary: Color32,
    /// Interactive widget fills.
    pub bg_tertiary: Color32,
    /// Outlines between panels.
    pub panel_outline: Color32,
    /// Default text.
    pub text_primary: Color32,
    /// Secondary text.
    pub text_muted: Color32,
    /// Highlight color for selections.
    pub accent: Color32,
    /// Destructive actions.
    pub danger: Color32,
}

/// The application palette.
pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(12, 12, 14),
        bg_secondary: Color32::from_rgb(24, 26, 29),
        bg_tertiary: Color32::from_rgb(40, 43, 47),
        panel_outline: Color32::from_rgb(52, 56, 62),
        text_primary: Color32::from_rgb(198, 203, 209),
        text_muted: Color32::from_rgb(132, 138, 146),
        accent: Color32::from_rgb(139, 178, 229),
        danger: Color32::from_rgb(214, 110, 98),
    }
}

/// Apply the application look on top of egui's dark visuals.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.override_text_color = Some(palette.text_primary);
    visuals.panel_fill = palette.bg_secondary;
    visuals.window_fill = palette.bg_secondary;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_tertiary;

    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.bg_stroke.color = palette.panel_outline;
    visuals.widgets.inactive.bg_fill = palette.bg_tertiary;
    visuals.widgets.inactive.weak_bg_fill = palette.bg_tertiary;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 54, 59);
    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(50, 54, 59);
    visuals.widgets.active.bg_fill = Color32::from_rgb(58, 63, 69);
    visuals.widgets.active.weak_bg_fill = Color32::from_rgb(58, 63, 69);

    visuals.selection.bg_fill = Color32::from_rgb(45, 66, 94);
    visuals.selection.stroke.color = palette.accent;

    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.widgets.noninteractive.corner_radius = CornerRadius::ZERO;
    visuals.widgets.inactive.corner_radius = CornerRadius::ZERO;
    visuals.widgets.hovered.corner_radius = CornerRadius::ZERO;
    visuals.widgets.active.corner_radius = CornerRadius::ZERO;
    visuals.widgets.open.corner_radius = CornerRadius::ZERO;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;
}

/// Category of the current status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    /// Nothing going on.
    Idle,
    /// A store request is running.
    Busy,
    /// Last operation finished fine.
    Info,
    /// Something needs attention but nothing failed.
    Warning,
    /// A request failed.
    Error,
}

/// Dot color for a status tone.
pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(96, 100, 106),
        StatusTone::Busy => Color32::from_rgb(64, 129, 201),
        StatusTone::Info => Color32::from_rgb(76, 154, 120),
        StatusTone::Warning => Color32::from_rgb(196, 146, 56),
        StatusTone::Error => Color32::from_rgb(192, 72, 62),
    }
}

const BADGE_TINTS: [Color32; 6] = [
    Color32::from_rgb(127, 199, 175),
    Color32::from_rgb(139, 178, 229),
    Color32::from_rgb(214, 180, 133),
    Color32::from_rgb(199, 156, 201),
    Color32::from_rgb(217, 196, 129),
    Color32::from_rgb(148, 197, 145),
];

/// Deterministic tint for a speaker badge. Badges without a resolvable
/// identifier get a neutral fill.
pub fn speaker_fill(id: Option<SpeakerId>) -> Color32 {
    match id {
        Some(id) => BADGE_TINTS[((id.get() - 1) as usize) % BADGE_TINTS.len()],
        None => Color32::from_rgb(108, 112, 118),
    }
}
