use egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub danger_fill: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(11, 16, 32),
        bg_secondary: Color32::from_rgb(17, 24, 39),
        bg_tertiary: Color32::from_rgb(30, 41, 59),
        panel_outline: Color32::from_rgb(51, 65, 85),
        grid_soft: Color32::from_rgb(24, 32, 48),
        text_primary: Color32::from_rgb(226, 232, 240),
        text_muted: Color32::from_rgb(148, 163, 184),
        accent: Color32::from_rgb(99, 102, 241),
        accent_soft: Color32::from_rgba_unmultiplied(99, 102, 241, 46),
        warning: Color32::from_rgb(217, 160, 72),
        danger: Color32::from_rgb(252, 165, 165),
        danger_fill: Color32::from_rgba_unmultiplied(69, 10, 10, 90),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_secondary;
    visuals.faint_bg_color = palette.grid_soft;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(12);
    visuals.menu_corner_radius = CornerRadius::same(8);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Fill for card-like sections (drop zone, tables, busy panel).
pub fn card_fill() -> Color32 {
    palette().bg_secondary
}

pub fn card_stroke(highlighted: bool) -> Stroke {
    let palette = palette();
    if highlighted {
        Stroke::new(2.0, palette.accent)
    } else {
        Stroke::new(1.0, palette.panel_outline)
    }
}

/// Tone used for the status badge in the footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Working",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
