use super::style;
use crate::egui_app::state::{DropZoneEvent, PICKER_EXTENSIONS, UiState};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Sense};

const ZONE_HEIGHT: f32 = 140.0;

/// Draw the drop target. Returns `Click` when the user pressed it.
pub(super) fn render(ui: &mut egui::Ui, state: &UiState) -> Option<DropZoneEvent> {
    let palette = style::palette();
    let highlighted = state.drop_zone.drag_over;
    let fill = if highlighted {
        palette.accent_soft
    } else {
        style::card_fill()
    };
    let frame = Frame::new()
        .fill(fill)
        .stroke(style::card_stroke(highlighted))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(20));
    let inner = frame.show(ui, |ui| {
        ui.set_min_size(egui::vec2(ui.available_width(), ZONE_HEIGHT));
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            let headline = if highlighted {
                "Release to upload"
            } else {
                "Drop a spreadsheet here or click to browse"
            };
            ui.label(
                RichText::new(headline)
                    .size(16.0)
                    .strong()
                    .color(palette.text_primary),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Accepted: .{}", PICKER_EXTENSIONS.join(", .")))
                    .color(palette.text_muted),
            );
        });
    });
    let response = ui
        .interact(inner.response.rect, ui.id().with("drop_zone"), Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    response.clicked().then_some(DropZoneEvent::Click)
}
