//! Minimal `multipart/form-data` body builder for file uploads.

use rand::Rng;

const CRLF: &[u8] = b"\r\n";

/// An in-memory multipart body.
pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start a form with a random boundary.
    pub(crate) fn new() -> Self {
        let token: u128 = rand::rng().random();
        Self::with_boundary(format!("----sheetdigest{token:032x}"))
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Value for the request's `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a file part.
    pub(crate) fn add_file(&mut self, field: &str, file_name: &str, bytes: &[u8]) {
        self.open_part();
        let disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape_quoted(field),
            escape_quoted(file_name)
        );
        self.body.extend_from_slice(disposition.as_bytes());
        self.body.extend_from_slice(CRLF);
        self.body
            .extend_from_slice(b"Content-Type: application/octet-stream");
        self.body.extend_from_slice(CRLF);
        self.body.extend_from_slice(CRLF);
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(CRLF);
    }

    /// Close the form and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(CRLF);
        self.body
    }

    fn open_part(&mut self) {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(CRLF);
    }
}

/// Percent-escape the characters that would break a quoted header value.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
