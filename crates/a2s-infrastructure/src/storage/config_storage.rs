//! Config file storage with atomic writes.
//!
//! Reads and writes a serde-typed TOML document. Writes go to a temporary
//! file in the same directory and are renamed into place.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use a2s_core::error::{A2sError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A TOML config file on disk.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Consistency**: TOML syntax validation on load/save
/// - **Durability**: Explicit fsync before rename
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new config storage handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the config file (usually a .toml file)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the config file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = toml::from_str(&content)?;
        Ok(Some(value))
    }

    /// Serializes `data` and saves it atomically.
    pub fn save<T: Serialize>(&self, data: &T) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Gets a temporary file path for atomic writes.
    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| A2sError::io("Path has no parent directory"))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| A2sError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2s_core::config::ShowroomConfig;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("config.toml"));

        let mut config = ShowroomConfig::default();
        config.simulation.payment_ms = 250;
        storage.save(&config).unwrap();

        let loaded: ShowroomConfig = storage.load().unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nonexistent.toml"));

        let result: Option<ShowroomConfig> = storage.load().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "  \n").unwrap();

        let result: Option<ShowroomConfig> = ConfigStorage::new(path).load().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[simulation\nupload_ms = ").unwrap();

        let err = ConfigStorage::new(path).load::<ShowroomConfig>().unwrap_err();
        assert!(matches!(err, A2sError::Serialization { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("config.toml");
        let storage = ConfigStorage::new(file_path.clone());

        storage.save(&ShowroomConfig::default()).unwrap();

        // Verify no temp file left behind
        let tmp_path = temp_dir.path().join("nested").join(".config.toml.tmp");
        assert!(!tmp_path.exists());
        assert!(file_path.exists());
    }
}
