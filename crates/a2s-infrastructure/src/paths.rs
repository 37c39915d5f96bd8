//! Path resolution for A2S configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/a2s/         # Config directory (platform config dir + "a2s")
//! └── config.toml        # Simulation delays and gate thresholds
//! ```
//!
//! The `A2S_CONFIG` environment variable points at a config file directly and
//! takes precedence over the platform directory.

use std::path::PathBuf;

use a2s_core::error::{A2sError, Result};

pub const CONFIG_ENV_VAR: &str = "A2S_CONFIG";

pub struct A2sPaths;

impl A2sPaths {
    /// Returns the A2S configuration directory (e.g., `~/.config/a2s/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("a2s"))
            .ok_or_else(|| A2sError::config("Cannot determine the platform config directory"))
    }

    /// Returns the path of the configuration file, honouring `A2S_CONFIG`.
    pub fn config_file() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::config_dir()?.join("config.toml")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_namespaced() {
        // Platforms without a config dir report an error instead.
        if let Ok(dir) = A2sPaths::config_dir() {
            assert!(dir.ends_with("a2s"));
        }
    }
}
