use crate::prediction::ConfidenceTier;
use eframe::egui::{
    Color32, Frame, Margin, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_orange: Color32,
    pub accent_blue: Color32,
    pub success: Color32,
    pub caution: Color32,
    pub danger: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(15, 23, 42),
        bg_secondary: Color32::from_rgb(30, 41, 59),
        bg_tertiary: Color32::from_rgb(44, 56, 76),
        panel_outline: Color32::from_rgb(64, 76, 98),
        text_primary: Color32::from_rgb(226, 232, 240),
        text_muted: Color32::from_rgb(148, 163, 184),
        accent_orange: Color32::from_rgb(249, 115, 22),
        accent_blue: Color32::from_rgb(37, 99, 235),
        success: Color32::from_rgb(74, 222, 128),
        caution: Color32::from_rgb(250, 204, 21),
        danger: Color32::from_rgb(248, 113, 113),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_secondary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.caution;
    visuals.selection.bg_fill = palette.accent_blue;
    visuals.selection.stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Rounded panel used for forms and result cards.
pub fn card_frame() -> Frame {
    let palette = palette();
    Frame::new()
        .fill(palette.bg_secondary)
        .stroke(Stroke::new(1.0, palette.panel_outline))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(16))
}

/// Card tinted with `accent`, used for banners and the main result.
pub fn tinted_frame(accent: Color32) -> Frame {
    Frame::new()
        .fill(accent.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, accent.gamma_multiply(0.6)))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(16))
}

pub fn tier_color(tier: ConfidenceTier) -> Color32 {
    let palette = palette();
    match tier {
        ConfidenceTier::High => palette.success,
        ConfidenceTier::Medium => palette.caution,
        ConfidenceTier::Low => palette.danger,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
