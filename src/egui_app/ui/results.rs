use super::{data_table, style};
use crate::egui_app::controller::SummaryController;
use crate::egui_app::state::InteractionState;
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText};

enum ResultAction {
    Download,
    OpenDirectly,
}

/// Draw whatever the session currently holds below the drop zone.
pub(super) fn render(ui: &mut egui::Ui, controller: &mut SummaryController) {
    let session = &controller.ui.session;
    let banner = session.error().map(str::to_string);
    match session.interaction() {
        InteractionState::Idle => return,
        InteractionState::Busy(file) => {
            render_busy(ui, file);
            return;
        }
        InteractionState::Error(message) => {
            render_error_banner(ui, message);
            return;
        }
        InteractionState::Result(_) => {}
    }
    if let Some(message) = banner {
        render_error_banner(ui, &message);
        ui.add_space(12.0);
    }
    if let Some(action) = render_actions(ui, controller) {
        match action {
            ResultAction::Download => controller.request_download(),
            ResultAction::OpenDirectly => controller.open_report_directly(),
        }
    }
    ui.add_space(12.0);
    let Some(view) = controller.ui.session.result_mut() else {
        return;
    };
    data_table::render(ui, &mut view.client_table, "client_summary");
    ui.add_space(16.0);
    data_table::render(ui, &mut view.zone_table, "zone_summary");
}

fn render_busy(ui: &mut egui::Ui, file: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::card_stroke(false))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(18.0).color(palette.accent));
                ui.label(
                    RichText::new(format!("Analyzing {file}..."))
                        .color(palette.text_primary),
                );
            });
        });
}

fn render_error_banner(ui: &mut egui::Ui, message: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.danger_fill)
        .stroke(egui::Stroke::new(1.0, palette.danger))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(palette.danger));
        });
}

fn render_actions(ui: &mut egui::Ui, controller: &SummaryController) -> Option<ResultAction> {
    let session = &controller.ui.session;
    let has_key = session
        .result()
        .and_then(|view| view.report_key())
        .is_some();
    if !has_key {
        return None;
    }
    let downloading = session.is_downloading();
    let mut action = None;
    ui.horizontal(|ui| {
        let label = if downloading {
            "Preparing..."
        } else {
            "Download report"
        };
        let download = ui.add_enabled(
            session.can_download(),
            egui::Button::new(RichText::new(label).strong())
                .fill(style::palette().accent)
                .min_size(egui::vec2(160.0, 30.0)),
        );
        if download.clicked() {
            action = Some(ResultAction::Download);
        }
        if downloading {
            ui.add(egui::Spinner::new().size(14.0));
        }
        let open = ui
            .add(egui::Button::new("Open directly").min_size(egui::vec2(120.0, 30.0)))
            .on_hover_text("Open the report link in your browser");
        if open.clicked() {
            action = Some(ResultAction::OpenDirectly);
        }
        ui.label(
            RichText::new(format!("Saves to {}", controller.download_dir().display()))
                .color(style::palette().text_muted),
        );
    });
    action
}
