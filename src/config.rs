//! Persisted client settings stored as `config.toml` in the app folder.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Service address used until the user configures another one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
/// Largest report accepted by default; matches the service's upload ceiling.
pub const DEFAULT_MAX_REPORT_BYTES: usize = 200 * 1024 * 1024;

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the summarizer service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Folder reports are saved into; `None` uses the OS download folder.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Upper bound on a downloaded report.
    #[serde(default = "default_max_report_bytes")]
    pub max_report_bytes: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            download_dir: None,
            max_report_bytes: default_max_report_bytes(),
        }
    }
}

impl AppSettings {
    /// Validate the server URL and strip its trailing slash.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.server_url = normalize_server_url(&self.server_url)?;
        Ok(self)
    }

    /// Folder downloads should be written to.
    pub fn resolved_download_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(app_dirs::default_download_dir()?),
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app folder could not be resolved or created.
    #[error("Config directory unavailable: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// `server_url` is not an http(s) URL.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app folder, writing defaults when the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let settings = AppSettings::default();
        save_to_path(&settings, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(settings);
    }
    load_from(&path)
}

/// Load and validate settings from a specific file.
pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: AppSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    settings.normalized()
}

/// Write settings to `path` atomically, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    use rand::Rng;

    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().ok_or_else(|| {
        write_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "config path has no parent directory",
        ))
    })?;
    std::fs::create_dir_all(dir).map_err(write_err)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let suffix: u32 = rand::rng().random();
    let tmp_path = dir.join(format!(".{file_name}.{suffix:08x}.tmp"));

    let result = std::fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|_| std::fs::rename(&tmp_path, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}

fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidServerUrl {
        url: trimmed.to_string(),
        reason,
    };
    let parsed = url::Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_max_report_bytes() -> usize {
    DEFAULT_MAX_REPORT_BYTES
}
