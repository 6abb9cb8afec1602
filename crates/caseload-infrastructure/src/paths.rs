//! Unified path management for Caseload files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/caseload/          # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── caseload.log.YYYY-MM-DD
//!
//! ~/.local/share/caseload/     # Data directory
//! └── local_store.json         # Durable key-value store
//! ```
//!
//! A base directory override puts everything under one root, which tests and
//! portable installs use.

use std::path::PathBuf;

const APP_DIR: &str = "caseload";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for caseload_core::CaseloadError {
    fn from(err: PathError) -> Self {
        caseload_core::CaseloadError::config(err.to_string())
    }
}

/// Files and directories managed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    LocalStore,
    Logs,
}

#[derive(Debug, Clone, Default)]
pub struct CaseloadPaths {
    base_dir: Option<PathBuf>,
}

impl CaseloadPaths {
    /// Creates a resolver. `Some(dir)` roots every path under `dir`.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Resolves the path of one managed file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        match service {
            ServiceType::Config => Ok(self.config_dir()?.join("config.toml")),
            ServiceType::LocalStore => Ok(self.data_dir()?.join("local_store.json")),
            ServiceType::Logs => Ok(self.config_dir()?.join("logs")),
        }
    }
}
