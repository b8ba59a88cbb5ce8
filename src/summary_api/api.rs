//! HTTP calls against the summarizer service.

use std::io;
use std::path::{Path, PathBuf};

use crate::downloads::{SaveError, SavedReport, StagedReport};
use crate::http_client;

use super::disposition::report_file_name;
use super::multipart::MultipartForm;
use super::types::{SelectedFile, UploadResult};

/// Path of the upload endpoint.
pub const UPLOAD_PATH: &str = "/api/upload";
/// Prefix of the report endpoint; the report key follows it verbatim.
pub const REPORT_PATH_PREFIX: &str = "/api/report/";
/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

const MAX_SUMMARY_RESPONSE_BYTES: usize = 64 * 1024 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 256 * 1024;

/// Errors from [`upload_file`].
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The service answered with a non-success status; the body is the message.
    #[error("{body}")]
    Rejected { status: u16, body: String },
    /// The success body was not a valid summary.
    #[error("{0}")]
    Decode(String),
    /// Connection or protocol failure before a status was received.
    #[error("{0}")]
    Transport(String),
    /// The selected file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
}

/// Errors from [`download_report`].
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The report endpoint answered with a non-success status.
    #[error("Download failed ({0})")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    /// The body could not be read or exceeded the size ceiling.
    #[error("Failed to read report: {0}")]
    Body(io::Error),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Path of the report named by `key`. No validation is applied to the key.
pub fn report_path(key: &str) -> String {
    format!("{REPORT_PATH_PREFIX}{key}")
}

/// Absolute report URL on `server_url`.
pub fn report_url(server_url: &str, key: &str) -> String {
    join_url(server_url, &report_path(key))
}

/// Submit `file` for analysis and decode the returned summary.
pub fn upload_file(server_url: &str, file: &SelectedFile) -> Result<UploadResult, UploadError> {
    let bytes = std::fs::read(&file.path).map_err(|source| UploadError::ReadFile {
        path: file.path.clone(),
        source,
    })?;
    let mut form = MultipartForm::new();
    form.add_file(UPLOAD_FIELD, &file.name, &bytes);
    let content_type = form.content_type();
    let body = form.finish();

    let url = join_url(server_url, UPLOAD_PATH);
    tracing::info!("Uploading {} ({} bytes) to {url}", file.name, bytes.len());
    let response = match http_client::agent()
        .post(&url)
        .set("Content-Type", &content_type)
        .set("Accept", "application/json")
        .send_bytes(&body)
    {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = http_client::read_response_text(response, MAX_ERROR_BODY_BYTES)
                .unwrap_or_else(|err| err.to_string());
            return Err(UploadError::Rejected { status, body });
        }
        Err(ureq::Error::Transport(err)) => return Err(UploadError::Transport(err.to_string())),
    };

    let bytes = http_client::read_response_bytes(response, MAX_SUMMARY_RESPONSE_BYTES)
        .map_err(|err| UploadError::Decode(err.to_string()))?;
    parse_upload_body(&bytes)
}

/// Fetch the report named by `key` and save it into `download_dir`.
pub fn download_report(
    server_url: &str,
    key: &str,
    download_dir: &Path,
    max_bytes: usize,
) -> Result<SavedReport, DownloadError> {
    let url = report_url(server_url, key);
    tracing::info!("Fetching report from {url}");
    let response = match http_client::agent().get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => return Err(DownloadError::Status(status)),
        Err(ureq::Error::Transport(err)) => return Err(DownloadError::Transport(err.to_string())),
    };
    let file_name = report_file_name(response.header("Content-Disposition"));
    let mut staged = StagedReport::create(download_dir)?;
    http_client::copy_response_to_writer(response, staged.writer(), max_bytes)
        .map_err(DownloadError::Body)?;
    Ok(staged.persist(&file_name)?)
}

fn parse_upload_body(bytes: &[u8]) -> Result<UploadResult, UploadError> {
    serde_json::from_slice(bytes).map_err(|err| UploadError::Decode(err.to_string()))
}

fn join_url(server_url: &str, path: &str) -> String {
    format!("{}{path}", server_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::serve_once;
    use tempfile::tempdir;

    fn http_response(status: &str, headers: &[&str], body: &[u8]) -> Vec<u8> {
        let mut out = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\n", body.len());
        for header in headers {
            out.push_str(header);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        let mut bytes = out.into_bytes();
        bytes.extend_from_slice(body);
        bytes
    }

    fn sample_file(dir: &Path) -> SelectedFile {
        let path = dir.join("orders.csv");
        std::fs::write(&path, "Zone,Client Name,Order Status\nN,Acme,Completed\n").unwrap();
        SelectedFile::from_path(path)
    }

    #[test]
    fn report_path_appends_key_verbatim() {
        assert_eq!(report_path("abc123"), "/api/report/abc123");
        assert_eq!(report_path(""), "/api/report/");
        assert_eq!(report_path("a/b?c"), "/api/report/a/b?c");
    }

    #[test]
    fn report_url_joins_without_double_slash() {
        assert_eq!(
            report_url("http://localhost:5000/", "k1"),
            "http://localhost:5000/api/report/k1"
        );
    }

    #[test]
    fn upload_posts_multipart_file_field() {
        let dir = tempdir().unwrap();
        let file = sample_file(dir.path());
        let body = br#"{"report_key":"abc123","client_summary":[{"Zone":"N"}],"zone_summary":[]}"#;
        let (url, rx) = serve_once(http_response(
            "200 OK",
            &["Content-Type: application/json"],
            body,
        ));

        let result = upload_file(&url, &file).unwrap();
        assert_eq!(result.downloadable_key(), Some("abc123"));
        assert_eq!(result.client_summary.len(), 1);

        let request = rx.recv().unwrap();
        assert!(request.head.starts_with("POST /api/upload HTTP/1.1"));
        assert!(request.head.contains("multipart/form-data; boundary="));
        let sent = String::from_utf8_lossy(&request.body);
        assert!(sent.contains("name=\"file\"; filename=\"orders.csv\""));
        assert!(sent.contains("N,Acme,Completed"));
    }

    #[test]
    fn rejected_upload_surfaces_body_verbatim() {
        let dir = tempdir().unwrap();
        let file = sample_file(dir.path());
        let (url, _rx) = serve_once(http_response(
            "400 BAD REQUEST",
            &[],
            b"Unsupported file type",
        ));

        let err = upload_file(&url, &file).unwrap_err();
        assert!(matches!(err, UploadError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "Unsupported file type");
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let file = sample_file(dir.path());
        let (url, _rx) = serve_once(http_response("200 OK", &[], b"<html>oops</html>"));

        let err = upload_file(&url, &file).unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn unreadable_file_fails_before_any_request() {
        let file = SelectedFile::from_path("/definitely/not/here.xlsx");
        let err = upload_file("http://127.0.0.1:9", &file).unwrap_err();
        assert!(matches!(err, UploadError::ReadFile { .. }));
    }

    #[test]
    fn download_saves_under_disposition_name() {
        let dir = tempdir().unwrap();
        let (url, rx) = serve_once(http_response(
            "200 OK",
            &["Content-Disposition: attachment; filename=\"summary_abc123.xlsx\""],
            b"PK-report",
        ));

        let saved = download_report(&url, "abc123", dir.path(), 1024).unwrap();
        assert_eq!(saved.path, dir.path().join("summary_abc123.xlsx"));
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"PK-report");
        let request = rx.recv().unwrap();
        assert!(request.head.starts_with("GET /api/report/abc123 HTTP/1.1"));
    }

    #[test]
    fn download_without_disposition_uses_default_name() {
        let dir = tempdir().unwrap();
        let (url, _rx) = serve_once(http_response("200 OK", &[], b"bytes"));
        let saved = download_report(&url, "k", dir.path(), 1024).unwrap();
        assert_eq!(saved.path, dir.path().join("report.xlsx"));
    }

    #[test]
    fn download_status_error_embeds_code() {
        let dir = tempdir().unwrap();
        let (url, _rx) = serve_once(http_response("404 NOT FOUND", &[], b"Report expired"));
        let err = download_report(&url, "gone", dir.path(), 1024).unwrap_err();
        assert!(matches!(err, DownloadError::Status(404)));
        assert_eq!(err.to_string(), "Download failed (404)");
    }

    #[test]
    fn oversized_report_is_rejected_and_not_saved() {
        let dir = tempdir().unwrap();
        let (url, _rx) = serve_once(http_response("200 OK", &[], &[0u8; 64]));
        let err = download_report(&url, "big", dir.path(), 16).unwrap_err();
        assert!(matches!(err, DownloadError::Body(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
