//! File-system adapters for A2S.

pub mod config_repository;
pub mod paths;
pub mod storage;

pub use crate::config_repository::TomlConfigRepository;
pub use crate::paths::A2sPaths;
