//! Client for the spreadsheet summarizer service.

mod multipart;
mod types;

pub mod api;
pub mod disposition;
pub mod records;
pub mod service;

pub use api::{DownloadError, UploadError};
pub use records::{COMPLETION_COLUMN, Record};
pub use service::{HttpSummaryService, ReportOpener, SummaryService, SystemBrowser};
pub use types::{SelectedFile, UploadResult};
