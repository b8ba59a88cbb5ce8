//! Wire types exchanged with the summarizer service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::records::Record;

/// Body returned by a successful upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Token naming the generated report on the service.
    #[serde(default)]
    pub report_key: Option<String>,
    /// Zone-by-client breakdown.
    #[serde(default, deserialize_with = "nullable_records")]
    pub client_summary: Vec<Record>,
    /// Zone rollup.
    #[serde(default, deserialize_with = "nullable_records")]
    pub zone_summary: Vec<Record>,
}

impl UploadResult {
    /// Report key when one is present and non-empty.
    pub fn downloadable_key(&self) -> Option<&str> {
        self.report_key.as_deref().filter(|key| !key.is_empty())
    }
}

fn nullable_records<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A file chosen by the user, ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Name sent to the service and shown while busy.
    pub name: String,
}

impl SelectedFile {
    /// Build a selection from a path, naming it after the final component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_body_in_column_order() {
        let body = r#"{
            "client_summary": [{"Zone": "N", "Client": "Acme", "Completion%": 42.4}],
            "zone_summary": [{"Zone": "N", "Count": 1}],
            "report_key": "abc123"
        }"#;
        let parsed: UploadResult = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.downloadable_key(), Some("abc123"));
        let columns: Vec<&str> = parsed.client_summary[0].keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["Zone", "Client", "Completion%"]);
        assert_eq!(parsed.zone_summary.len(), 1);
    }

    #[test]
    fn missing_or_null_collections_decode_empty() {
        let parsed: UploadResult =
            serde_json::from_str(r#"{"report_key": "k", "zone_summary": null}"#).unwrap();
        assert!(parsed.client_summary.is_empty());
        assert!(parsed.zone_summary.is_empty());
    }

    #[test]
    fn empty_report_key_is_not_downloadable() {
        let parsed: UploadResult = serde_json::from_str(r#"{"report_key": ""}"#).unwrap();
        assert_eq!(parsed.downloadable_key(), None);
    }

    #[test]
    fn selected_file_uses_file_name() {
        let file = SelectedFile::from_path("/data/orders.csv");
        assert_eq!(file.name, "orders.csv");
    }
}
