//! Upload/download interaction state, mutated only through the transitions below.

use crate::downloads::SavedReport;
use crate::summary_api::{DownloadError, SelectedFile, UploadError, UploadResult};

use super::table::DataTableState;

/// Title of the zone-by-client table.
pub const CLIENT_TABLE_TITLE: &str = "Zone × Client Summary";
/// Title of the zone rollup table.
pub const ZONE_TABLE_TITLE: &str = "Zone Rollup";
/// Message used when an upload error has no text of its own.
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed";
/// Message used when a download error has no text of its own.
pub const DOWNLOAD_FAILED_FALLBACK: &str = "Download failed";

/// A committed upload together with the tables built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub result: UploadResult,
    pub client_table: DataTableState,
    pub zone_table: DataTableState,
}

impl ResultView {
    fn new(result: UploadResult) -> Self {
        let client_table =
            DataTableState::new(CLIENT_TABLE_TITLE, Some(result.client_summary.clone()));
        let zone_table = DataTableState::new(ZONE_TABLE_TITLE, Some(result.zone_summary.clone()));
        Self {
            result,
            client_table,
            zone_table,
        }
    }

    pub fn report_key(&self) -> Option<&str> {
        self.result.downloadable_key()
    }
}

/// Handle for an upload that has been dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTicket {
    pub request_id: u64,
    pub file: SelectedFile,
}

/// Handle for a dispatched download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTicket {
    /// Upload the report belongs to.
    pub upload_id: u64,
    pub report_key: String,
}

/// Whether a finished upload changed the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Committed,
    Stale,
}

/// What the window shows, derived from [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionState<'a> {
    Idle,
    Busy(&'a str),
    Error(&'a str),
    Result(&'a ResultView),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    busy_file: Option<String>,
    error: Option<String>,
    result: Option<ResultView>,
    downloading: bool,
    last_upload_id: u64,
}

impl SessionState {
    /// Start a new upload attempt, discarding any previous result or error.
    pub fn begin_upload(&mut self, file: SelectedFile) -> UploadTicket {
        self.last_upload_id += 1;
        self.error = None;
        self.result = None;
        self.busy_file = Some(file.name.clone());
        UploadTicket {
            request_id: self.last_upload_id,
            file,
        }
    }

    /// Apply an upload completion unless a newer upload superseded it.
    pub fn finish_upload(
        &mut self,
        request_id: u64,
        outcome: Result<UploadResult, UploadError>,
    ) -> UploadOutcome {
        if request_id != self.last_upload_id {
            return UploadOutcome::Stale;
        }
        self.busy_file = None;
        match outcome {
            Ok(result) => {
                self.error = None;
                self.result = Some(ResultView::new(result));
            }
            Err(err) => {
                self.error = Some(message_or(err.to_string(), UPLOAD_FAILED_FALLBACK));
            }
        }
        UploadOutcome::Committed
    }

    /// Claim the download slot for the current report.
    ///
    /// Returns `None` without a result, without a report key, or while a
    /// download is already running.
    pub fn begin_download(&mut self) -> Option<DownloadTicket> {
        if self.downloading {
            return None;
        }
        let report_key = self.result.as_ref()?.report_key()?.to_string();
        self.error = None;
        self.downloading = true;
        Some(DownloadTicket {
            upload_id: self.last_upload_id,
            report_key,
        })
    }

    /// Release the download slot and record a failure message if the
    /// report still belongs to the current upload.
    ///
    /// Returns the message shown to the user, if any.
    pub fn finish_download(
        &mut self,
        ticket: &DownloadTicket,
        outcome: &Result<SavedReport, DownloadError>,
    ) -> Option<String> {
        self.downloading = false;
        let Err(err) = outcome else {
            return None;
        };
        let message = message_or(err.to_string(), DOWNLOAD_FAILED_FALLBACK);
        if ticket.upload_id == self.last_upload_id {
            self.error = Some(message.clone());
        }
        Some(message)
    }

    pub fn interaction(&self) -> InteractionState<'_> {
        if let Some(file) = &self.busy_file {
            InteractionState::Busy(file)
        } else if let Some(view) = &self.result {
            InteractionState::Result(view)
        } else if let Some(error) = &self.error {
            InteractionState::Error(error)
        } else {
            InteractionState::Idle
        }
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut ResultView> {
        self.result.as_mut()
    }

    /// True when a download request would start a fetch.
    pub fn can_download(&self) -> bool {
        !self.downloading
            && self
                .result
                .as_ref()
                .and_then(ResultView::report_key)
                .is_some()
    }
}

fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
