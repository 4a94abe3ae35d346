/*
 * Manages the plugin's persisted export settings: destination directory,
 * root to remove and root to substitute. The settings live as a small JSON
 * file in the application state directory and default to empty strings when
 * nothing has been saved yet.
 *
 * It uses a trait-based approach (`SettingsStoreOperations`) to allow for
 * different storage backends or mock implementations for testing. The
 * concrete implementation (`CoreSettingsStore`) handles the file system
 * interaction, using the shared path utility to locate the state directory.
 */
use super::models::ExportSettings;
use crate::core::path_utils;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

const SETTINGS_FILE_NAME: &str = "export_settings.json";

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoStateDirectory,
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serde(err)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Settings I/O error: {e}"),
            SettingsError::Serde(e) => write!(f, "Settings serialization error: {e}"),
            SettingsError::NoStateDirectory => {
                write!(f, "Could not determine state directory for settings")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;

pub trait SettingsStoreOperations: Send + Sync {
    fn load_settings(&self) -> Result<ExportSettings>;
    fn save_settings(&self, settings: &ExportSettings) -> Result<()>;
}

pub struct CoreSettingsStore {
    state_dir: PathBuf,
}

impl CoreSettingsStore {
    pub fn new(app_name: &str) -> Result<Self> {
        path_utils::get_base_app_state_dir(app_name)
            .map(|state_dir| CoreSettingsStore { state_dir })
            .ok_or(SettingsError::NoStateDirectory)
    }

    /// Creates a store over an explicit directory. Used by tests.
    pub fn with_state_dir(state_dir: PathBuf) -> Self {
        CoreSettingsStore { state_dir }
    }

    fn file_path(&self) -> PathBuf {
        self.state_dir.join(SETTINGS_FILE_NAME)
    }
}

impl SettingsStoreOperations for CoreSettingsStore {
    /*
     * Loads the persisted settings, or the all-empty defaults when nothing
     * has been saved yet.
     */
    fn load_settings(&self) -> Result<ExportSettings> {
        let file_path = self.file_path();
        if !file_path.exists() {
            log::debug!("SettingsStore: {file_path:?} does not exist, using defaults.");
            return Ok(ExportSettings::default());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let settings: ExportSettings = serde_json::from_reader(reader)?;
        log::debug!("SettingsStore: Loaded settings from {file_path:?}.");
        Ok(settings)
    }

    fn save_settings(&self, settings: &ExportSettings) -> Result<()> {
        let file_path = self.file_path();
        let file = File::create(&file_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, settings)?;
        log::debug!("SettingsStore: Saved settings to {file_path:?}.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_settings_defaults_when_missing() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = CoreSettingsStore::with_state_dir(temp_dir.path().to_path_buf());

        let settings = store.load_settings()?;
        assert_eq!(settings, ExportSettings::default());
        Ok(())
    }

    #[test]
    fn test_save_and_load_settings_round_trip() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = CoreSettingsStore::with_state_dir(temp_dir.path().to_path_buf());
        let settings = ExportSettings {
            destination: "/exports".to_string(),
            remove_root: "/music".to_string(),
            new_root: "/mnt/sdcard".to_string(),
        };

        store.save_settings(&settings)?;
        let loaded = store.load_settings()?;

        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_save_settings_overwrites_previous() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = CoreSettingsStore::with_state_dir(temp_dir.path().to_path_buf());

        let first = ExportSettings {
            destination: "/one".to_string(),
            ..ExportSettings::default()
        };
        let second = ExportSettings {
            destination: "/two".to_string(),
            ..ExportSettings::default()
        };

        store.save_settings(&first)?;
        store.save_settings(&second)?;

        assert_eq!(store.load_settings()?.destination, "/two");
        Ok(())
    }
}
