//! Seams between the controller and the outside world.

use std::path::Path;

use crate::downloads::SavedReport;

use super::api::{self, DownloadError, UploadError};
use super::types::{SelectedFile, UploadResult};

/// Operations the controller needs from the summarizer service.
///
/// Implementations are called from worker threads.
pub trait SummaryService: Send + Sync {
    /// Upload a file and return the computed summary.
    fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadError>;
    /// Fetch the report for `key` and save it into `download_dir`.
    fn download_report(&self, key: &str, download_dir: &Path)
    -> Result<SavedReport, DownloadError>;
    /// Absolute URL of the report for `key`.
    fn report_url(&self, key: &str) -> String;
}

/// Opens report URLs outside the app.
pub trait ReportOpener: Send + Sync {
    /// Hand `url` to whatever handles links on this machine.
    fn open_url(&self, url: &str) -> std::io::Result<()>;
}

/// [`SummaryService`] backed by the real HTTP endpoints.
#[derive(Clone, Debug)]
pub struct HttpSummaryService {
    server_url: String,
    max_report_bytes: usize,
}

impl HttpSummaryService {
    /// Client for the service at `server_url`, capping reports at `max_report_bytes`.
    pub fn new(server_url: impl Into<String>, max_report_bytes: usize) -> Self {
        Self {
            server_url: server_url.into(),
            max_report_bytes,
        }
    }

    /// Base URL every request is built from.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

impl SummaryService for HttpSummaryService {
    fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadError> {
        api::upload_file(&self.server_url, file)
    }

    fn download_report(
        &self,
        key: &str,
        download_dir: &Path,
    ) -> Result<SavedReport, DownloadError> {
        api::download_report(&self.server_url, key, download_dir, self.max_report_bytes)
    }

    fn report_url(&self, key: &str) -> String {
        api::report_url(&self.server_url, key)
    }
}

/// Opens URLs in the system's default browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemBrowser;

impl ReportOpener for SystemBrowser {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}
