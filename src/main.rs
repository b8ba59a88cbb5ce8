#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the sheetdigest desktop client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use sheetdigest::config;
use sheetdigest::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use sheetdigest::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("sheetdigest")
        .with_inner_size([1100.0, 780.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "sheetdigest",
        native_options,
        Box::new(move |_cc| match build_app() {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

fn build_app() -> Result<EguiApp, String> {
    let settings =
        config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
    EguiApp::new(&settings)
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
