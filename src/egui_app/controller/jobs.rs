use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::downloads::SavedReport;
use crate::egui_app::state::{DownloadTicket, UploadTicket};
use crate::summary_api::{DownloadError, SummaryService, UploadError, UploadResult};

pub(super) enum JobMessage {
    UploadFinished(UploadJobResult),
    DownloadFinished(DownloadJobResult),
}

#[derive(Debug)]
pub(super) struct UploadJobResult {
    pub(super) request_id: u64,
    pub(super) file_name: String,
    pub(super) result: Result<UploadResult, UploadError>,
}

#[derive(Debug)]
pub(super) struct DownloadJobResult {
    pub(super) ticket: DownloadTicket,
    pub(super) result: Result<SavedReport, DownloadError>,
}

pub(super) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    uploads_in_flight: usize,
    download_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            uploads_in_flight: 0,
            download_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn has_pending(&self) -> bool {
        self.uploads_in_flight > 0 || self.download_in_progress
    }

    /// Uploads are never skipped; superseded ones are dropped when they report back.
    pub(super) fn begin_upload(&mut self, service: Arc<dyn SummaryService>, ticket: UploadTicket) {
        self.uploads_in_flight += 1;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.upload(&ticket.file);
            let _ = tx.send(JobMessage::UploadFinished(UploadJobResult {
                request_id: ticket.request_id,
                file_name: ticket.file.name,
                result,
            }));
        });
    }

    pub(super) fn clear_upload(&mut self) {
        self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
    }

    pub(super) fn begin_download(
        &mut self,
        service: Arc<dyn SummaryService>,
        download_dir: PathBuf,
        ticket: DownloadTicket,
    ) {
        if self.download_in_progress {
            return;
        }
        self.download_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.download_report(&ticket.report_key, &download_dir);
            let _ = tx.send(JobMessage::DownloadFinished(DownloadJobResult { ticket, result }));
        });
    }

    pub(super) fn clear_download(&mut self) {
        self.download_in_progress = false;
    }
}
