//! Desktop client for the spreadsheet summarizer service.

/// Application folder resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Saving downloaded reports to disk.
pub mod downloads;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent and bounded body readers.
pub mod http_client;
/// Tracing setup.
pub mod logging;
/// Summarizer service client.
pub mod summary_api;
