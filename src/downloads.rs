//! Saving downloaded reports into the user's download folder.
//!
//! Bytes are staged in a temporary file inside the target folder and only
//! take their final name once fully written, so an interrupted download never
//! leaves a truncated report behind. Existing files are never overwritten;
//! the name gains a ` (n)` suffix instead.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::summary_api::disposition::DEFAULT_REPORT_NAME;

const MAX_NAME_ATTEMPTS: usize = 1000;

/// A report written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedReport {
    /// Final location of the report.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: u64,
}

/// Errors raised while saving a report.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Unable to create download folder {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Unable to stage download in {path}: {source}")]
    Stage { path: PathBuf, source: io::Error },
    #[error("Unable to save {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
    #[error("No free file name for {name} in {dir}")]
    NoFreeName { dir: PathBuf, name: String },
}

/// A partially written report that has not been given its final name yet.
pub struct StagedReport {
    dir: PathBuf,
    file: NamedTempFile,
}

impl StagedReport {
    /// Create the staging file inside `dir`, creating `dir` if needed.
    pub fn create(dir: &Path) -> Result<Self, SaveError> {
        std::fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let file = tempfile::Builder::new()
            .prefix(".sheetdigest-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|source| SaveError::Stage {
                path: dir.to_path_buf(),
                source,
            })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            file,
        })
    }

    /// Writer for the report bytes.
    pub fn writer(&mut self) -> &mut std::fs::File {
        self.file.as_file_mut()
    }

    /// Move the staged bytes to the first free variant of `suggested_name`.
    pub fn persist(mut self, suggested_name: &str) -> Result<SavedReport, SaveError> {
        self.file
            .as_file_mut()
            .flush()
            .and_then(|_| self.file.as_file().sync_all())
            .map_err(|source| SaveError::Persist {
                path: self.file.path().to_path_buf(),
                source,
            })?;
        let bytes = self
            .file
            .as_file()
            .metadata()
            .map(|meta| meta.len())
            .unwrap_or(0);
        let name = sanitize_file_name(suggested_name);
        let mut staged = self.file;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = self.dir.join(numbered_name(&name, attempt));
            match staged.persist_noclobber(&candidate) {
                Ok(_) => {
                    return Ok(SavedReport {
                        path: candidate,
                        bytes,
                    });
                }
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    staged = err.file;
                }
                Err(err) => {
                    return Err(SaveError::Persist {
                        path: candidate,
                        source: err.error,
                    });
                }
            }
        }
        Err(SaveError::NoFreeName {
            dir: self.dir,
            name,
        })
    }
}

/// Make a server-suggested name safe to use as a single path component.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let trimmed = replaced.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        DEFAULT_REPORT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `name` for attempt 0, then `stem (n).ext`.
fn numbered_name(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{name} ({attempt})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn save(dir: &Path, name: &str, bytes: &[u8]) -> SavedReport {
        let mut staged = StagedReport::create(dir).unwrap();
        staged.writer().write_all(bytes).unwrap();
        staged.persist(name).unwrap()
    }

    #[test]
    fn saves_under_suggested_name() {
        let dir = tempdir().unwrap();
        let saved = save(dir.path(), "summary.xlsx", b"PK\x03\x04");
        assert_eq!(saved.path, dir.path().join("summary.xlsx"));
        assert_eq!(saved.bytes, 4);
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"PK\x03\x04");
    }

    #[test]
    fn never_overwrites_existing_reports() {
        let dir = tempdir().unwrap();
        save(dir.path(), "summary.xlsx", b"first");
        let second = save(dir.path(), "summary.xlsx", b"second");
        let third = save(dir.path(), "summary.xlsx", b"third");
        assert_eq!(second.path, dir.path().join("summary (1).xlsx"));
        assert_eq!(third.path, dir.path().join("summary (2).xlsx"));
        assert_eq!(std::fs::read(dir.path().join("summary.xlsx")).unwrap(), b"first");
    }

    #[test]
    fn leaves_no_staging_files_behind() {
        let dir = tempdir().unwrap();
        save(dir.path(), "summary.xlsx", b"data");
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["summary.xlsx"]);
    }

    #[test]
    fn creates_missing_download_folder() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let saved = save(&nested, "r.xlsx", b"x");
        assert!(saved.path.starts_with(&nested));
    }

    #[test]
    fn sanitizes_path_like_names() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("a\\b:c.xlsx"), "a_b_c.xlsx");
        assert_eq!(sanitize_file_name("  ..  "), "report.xlsx");
        assert_eq!(sanitize_file_name(""), "report.xlsx");
    }

    #[test]
    fn numbers_names_without_extension() {
        assert_eq!(numbered_name("report", 2), "report (2)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
        assert_eq!(numbered_name("a.tar.gz", 1), "a.tar (1).gz");
    }
}
