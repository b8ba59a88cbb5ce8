use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sheetdigest::downloads::SavedReport;
use sheetdigest::egui_app::controller::SummaryController;
use sheetdigest::summary_api::api::report_url;
use sheetdigest::summary_api::{
    DownloadError, ReportOpener, SelectedFile, SummaryService, UploadError, UploadResult,
};

pub const FAKE_SERVER: &str = "http://summaries.test";

type UploadFn = dyn Fn(&SelectedFile) -> Result<UploadResult, UploadError> + Send + Sync;
type DownloadFn = dyn Fn(&str, &Path) -> Result<SavedReport, DownloadError> + Send + Sync;

/// Scripted [`SummaryService`] that records every call it receives.
pub struct FakeService {
    upload: Box<UploadFn>,
    download: Box<DownloadFn>,
    uploads: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            upload: Box::new(|_| Err(UploadError::Transport("no upload scripted".into()))),
            download: Box::new(|_, _| Err(DownloadError::Transport("no download scripted".into()))),
            uploads: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub fn on_upload(
        mut self,
        upload: impl Fn(&SelectedFile) -> Result<UploadResult, UploadError> + Send + Sync + 'static,
    ) -> Self {
        self.upload = Box::new(upload);
        self
    }

    pub fn on_download(
        mut self,
        download: impl Fn(&str, &Path) -> Result<SavedReport, DownloadError> + Send + Sync + 'static,
    ) -> Self {
        self.download = Box::new(download);
        self
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn downloaded_keys(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl SummaryService for FakeService {
    fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadError> {
        self.uploads.lock().unwrap().push(file.name.clone());
        (self.upload)(file)
    }

    fn download_report(
        &self,
        key: &str,
        download_dir: &Path,
    ) -> Result<SavedReport, DownloadError> {
        self.downloads.lock().unwrap().push(key.to_string());
        (self.download)(key, download_dir)
    }

    fn report_url(&self, key: &str) -> String {
        report_url(FAKE_SERVER, key)
    }
}

/// [`ReportOpener`] that records URLs instead of launching a browser.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl ReportOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(std::io::Error::other("no browser available"));
        }
        Ok(())
    }
}

/// Blocks a scripted call until the test releases it.
pub struct Gate {
    rx: Mutex<Receiver<()>>,
}

impl Gate {
    pub fn new() -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Self { rx: Mutex::new(rx) }), tx)
    }

    pub fn wait(&self) {
        let _ = self
            .rx
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5));
    }
}

/// Poll `controller` until no background work is pending.
pub fn settle(controller: &mut SummaryController) {
    for _ in 0..1000 {
        controller.poll_jobs();
        if !controller.has_pending_jobs() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("background jobs did not finish");
}

/// Poll until `done` holds or the wait times out.
pub fn poll_until(controller: &mut SummaryController, done: impl Fn(&SummaryController) -> bool) {
    for _ in 0..1000 {
        controller.poll_jobs();
        if done(controller) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("condition not reached");
}

pub fn upload_result(value: serde_json::Value) -> UploadResult {
    serde_json::from_value(value).expect("valid upload result")
}
