use super::style;
use crate::egui_app::state::{DataTableState, PLACEHOLDER_TEXT};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, TextEdit};

const TABLE_MAX_HEIGHT: f32 = 320.0;

/// Draw a titled, searchable table.
pub(super) fn render(ui: &mut egui::Ui, table: &mut DataTableState, id_salt: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::card_stroke(false))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&table.title)
                        .size(15.0)
                        .strong()
                        .color(palette.text_primary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut query = table.query().to_string();
                    let response = ui.add(
                        TextEdit::singleline(&mut query)
                            .id_salt(format!("{id_salt}_search"))
                            .hint_text("Search...")
                            .desired_width(200.0),
                    );
                    if response.changed() {
                        table.set_query(query);
                    }
                });
            });
            ui.add_space(8.0);
            egui::ScrollArea::both()
                .id_salt(format!("{id_salt}_scroll"))
                .max_height(TABLE_MAX_HEIGHT)
                .auto_shrink([false, true])
                .show(ui, |ui| render_grid(ui, table, id_salt));
        });
}

fn render_grid(ui: &mut egui::Ui, table: &DataTableState, id_salt: &str) {
    let palette = style::palette();
    if table.shows_placeholder() {
        ui.label(RichText::new(PLACEHOLDER_TEXT).color(palette.text_muted));
        return;
    }
    egui::Grid::new(format!("{id_salt}_grid"))
        .striped(true)
        .spacing(egui::vec2(18.0, 6.0))
        .show(ui, |ui| {
            for column in table.columns() {
                ui.label(RichText::new(column).strong().color(palette.text_primary));
            }
            ui.end_row();
            for row in 0..table.rendered_row_count() {
                let Some(cells) = table.row_cells(row) else {
                    break;
                };
                for cell in cells {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
    if table.rendered_row_count() == 0 {
        ui.add_space(4.0);
        ui.label(RichText::new("No matching rows").color(palette.text_muted));
    }
}
