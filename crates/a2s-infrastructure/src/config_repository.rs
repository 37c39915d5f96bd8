//! TOML-backed configuration repository.

use std::path::PathBuf;

use a2s_core::config::{ConfigRepository, ShowroomConfig};
use a2s_core::error::Result;
use async_trait::async_trait;

use crate::paths::A2sPaths;
use crate::storage::ConfigStorage;

/// Loads [`ShowroomConfig`] from a TOML file. A missing or empty file yields
/// the defaults.
pub struct TomlConfigRepository {
    storage: ConfigStorage,
}

impl TomlConfigRepository {
    /// Repository over the default config location (see [`A2sPaths`]).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(A2sPaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: ConfigStorage::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.storage.path()
    }
}

#[async_trait]
impl ConfigRepository for TomlConfigRepository {
    async fn load(&self) -> Result<ShowroomConfig> {
        match self.storage.load::<ShowroomConfig>()? {
            Some(config) => {
                tracing::debug!("[Config] Loaded {}", self.storage.path().display());
                Ok(config)
            }
            None => {
                tracing::debug!(
                    "[Config] No config at {}, using defaults",
                    self.storage.path().display()
                );
                Ok(ShowroomConfig::default())
            }
        }
    }

    async fn save(&self, config: &ShowroomConfig) -> Result<()> {
        self.storage.save(config)?;
        tracing::info!("[Config] Saved {}", self.storage.path().display());
        Ok(())
    }
}
