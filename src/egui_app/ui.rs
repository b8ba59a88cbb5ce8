//! egui renderer for the application UI.

mod data_table;
mod drop_zone;
mod results;
pub mod style;

use std::time::Duration;

use crate::config::AppSettings;
use crate::egui_app::controller::SummaryController;
use crate::egui_app::state::DropZoneEvent;
use eframe::egui::{self, Frame, Margin, RichText};

const JOB_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Smallest window size that keeps the drop zone and tables usable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: SummaryController,
    visuals_set: bool,
    files_hovering: bool,
}

impl EguiApp {
    /// Create the app from loaded settings.
    pub fn new(settings: &AppSettings) -> Result<Self, String> {
        let controller = SummaryController::new(settings)
            .map_err(|err| format!("Failed to prepare downloads: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: SummaryController) -> Self {
        Self {
            controller,
            visuals_set: false,
            files_hovering: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Turn window-level hover and drop input into drop zone events.
    fn forward_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            let dropped: Vec<_> = i
                .raw
                .dropped_files
                .iter()
                .map(|file| file.path.clone())
                .collect();
            (!i.raw.hovered_files.is_empty(), dropped)
        });
        if !dropped.is_empty() {
            self.files_hovering = false;
            self.controller
                .handle_drop_zone_event(DropZoneEvent::Drop(dropped));
            return;
        }
        if hovering != self.files_hovering {
            self.files_hovering = hovering;
            let event = if hovering {
                DropZoneEvent::DragEnter
            } else {
                DropZoneEvent::DragLeave
            };
            self.controller.handle_drop_zone_event(event);
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("header")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Spreadsheet Summary")
                            .size(18.0)
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new("Upload an export to see zone and client totals")
                            .color(palette.text_muted),
                    );
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    let text = ui.label(RichText::new(&status.text).color(palette.text_muted));
                    if status.log.len() > 1 {
                        let _ = text.on_hover_text(status.log_text());
                    }
                });
            });
    }

    fn render_body(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(style::palette().bg_primary)
                    .inner_margin(Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("body_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if let Some(event) = drop_zone::render(ui, &self.controller.ui) {
                            self.controller.handle_drop_zone_event(event);
                        }
                        ui.add_space(16.0);
                        results::render(ui, &mut self.controller);
                    });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        self.forward_file_drops(ctx);
        self.render_header(ctx);
        self.render_status(ctx);
        self.render_body(ctx);
        if self.controller.has_pending_jobs() {
            ctx.request_repaint_after(JOB_POLL_INTERVAL);
        }
    }
}
