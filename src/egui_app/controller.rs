//! Bridges the summarizer client to the egui UI.

mod background_jobs;
mod download;
mod jobs;
mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfd::FileDialog;

use crate::config::{AppSettings, ConfigError};
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::summary_api::{HttpSummaryService, ReportOpener, SummaryService, SystemBrowser};

use jobs::ControllerJobs;

/// Owns the UI state and runs uploads and downloads off the UI thread.
pub struct SummaryController {
    pub ui: UiState,
    service: Arc<dyn SummaryService>,
    opener: Arc<dyn ReportOpener>,
    download_dir: PathBuf,
    jobs: ControllerJobs,
}

impl SummaryController {
    /// Build a controller talking to the configured service.
    pub fn new(settings: &AppSettings) -> Result<Self, ConfigError> {
        let download_dir = settings.resolved_download_dir()?;
        let service = HttpSummaryService::new(settings.server_url.clone(), settings.max_report_bytes);
        tracing::info!(
            "Using summarizer at {}, saving reports to {}",
            service.server_url(),
            download_dir.display()
        );
        Ok(Self::with_backend(
            Arc::new(service),
            Arc::new(SystemBrowser),
            download_dir,
        ))
    }

    /// Build a controller around explicit service and browser seams.
    pub fn with_backend(
        service: Arc<dyn SummaryService>,
        opener: Arc<dyn ReportOpener>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            ui: UiState::default(),
            service,
            opener,
            download_dir,
            jobs: ControllerJobs::new(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Route a drop zone event and act on the resulting selection.
    pub fn handle_drop_zone_event(&mut self, event: DropZoneEvent) {
        match self.ui.drop_zone.handle(event) {
            DropZoneAction::None => {}
            DropZoneAction::Selected(file) => self.handle_file(file),
            DropZoneAction::OpenPicker => self.pick_file_via_dialog(),
        }
    }

    /// Ask the user for a spreadsheet with the native picker.
    pub fn pick_file_via_dialog(&mut self) {
        let picked = FileDialog::new()
            .set_title("Choose a spreadsheet")
            .add_filter("Spreadsheets", PICKER_EXTENSIONS)
            .pick_file();
        let files = picked.into_iter().collect();
        self.handle_drop_zone_event(DropZoneEvent::PickerChanged(files));
    }

    /// Update the footer status.
    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }

    /// Apply finished background work. Call once per frame.
    pub fn poll_jobs(&mut self) {
        self.poll_background_jobs();
    }

    /// True while an upload or download is still running.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.has_pending()
    }

    fn report_url(&self, key: &str) -> String {
        self.service.report_url(key)
    }

    fn selected_report_key(&self) -> Option<String> {
        self.ui
            .session
            .result()
            .and_then(ResultView::report_key)
            .map(str::to_string)
    }
}
