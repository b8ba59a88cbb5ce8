//! Application directory helpers anchored to a single `.sheetdigest` folder.
//!
//! The helpers centralize where config, log, and fallback download files live
//! across platforms, defaulting to the OS config directory (e.g., `%APPDATA%`
//! on Windows) and allowing a `SHEETDIGEST_CONFIG_HOME` override for tests or
//! portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::{BaseDirs, UserDirs};
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".sheetdigest";
/// Environment variable that relocates the config root.
pub const CONFIG_HOME_ENV: &str = "SHEETDIGEST_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.sheetdigest` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    let path = base.join(APP_DIR_NAME);
    create_dir(path)
}

/// Return the logs directory inside the `.sheetdigest` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    create_dir(app_root_dir()?.join("logs"))
}

/// Directory reports are saved into when no download folder is configured.
///
/// Prefers the user's OS download folder and falls back to a `downloads`
/// folder inside the app root when the platform does not expose one.
/// A relocated config root keeps downloads next to it as well.
pub fn default_download_dir() -> Result<PathBuf, AppDirError> {
    let relocated = has_override() || std::env::var_os(CONFIG_HOME_ENV).is_some();
    if !relocated {
        if let Some(dir) = UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from))
        {
            return Ok(dir);
        }
    }
    create_dir(app_root_dir()?.join("downloads"))
}

fn create_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn has_override() -> bool {
    CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .is_some_and(|guard| guard.is_some())
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
fn set_config_base_override(path: PathBuf) {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = Some(path);
}

#[cfg(test)]
fn clear_config_base_override() {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = None;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::MutexGuard;

    static SERIAL: Mutex<()> = Mutex::new(());

    /// Points the config root at a temp folder for the guard's lifetime.
    pub(crate) struct OverrideGuard {
        _lock: MutexGuard<'static, ()>,
    }

    impl OverrideGuard {
        pub(crate) fn set(path: PathBuf) -> Self {
            let lock = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
            set_config_base_override(path);
            Self { _lock: lock }
        }
    }

    impl Drop for OverrideGuard {
        fn drop(&mut self) {
            clear_config_base_override();
        }
    }
}
