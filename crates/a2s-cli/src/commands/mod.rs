pub mod config;
pub mod replay;
pub mod screens;

use std::path::PathBuf;

use a2s_infrastructure::TomlConfigRepository;
use anyhow::Result;

/// Repository for `--config`, or the default location.
pub fn repository(path: Option<PathBuf>) -> Result<TomlConfigRepository> {
    match path {
        Some(path) => Ok(TomlConfigRepository::with_path(path)),
        None => Ok(TomlConfigRepository::new()?),
    }
}
