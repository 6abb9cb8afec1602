//! Configuration service.
//!
//! Loads [`ClientConfig`] from `config.toml`, writing the defaults when the
//! file does not exist yet, then applies environment overrides.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use caseload_core::Result;
use caseload_core::config::ClientConfig;

use crate::paths::{CaseloadPaths, ServiceType};
use crate::storage::{AtomicFile, FileFormat};

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "CASELOAD_API_URL";
/// Overrides `logging.level`.
pub const ENV_LOG: &str = "CASELOAD_LOG";

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &CaseloadPaths) -> Result<Self> {
        Ok(Self::with_path(paths.get_path(ServiceType::Config)?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_overrides(&mut loaded, |name| std::env::var(name).ok());

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let file = AtomicFile::<ClientConfig>::new(self.path.clone(), FileFormat::Toml);
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let default_config = ClientConfig::default();
                file.save(&default_config)?;
                tracing::info!("Wrote default config to {}", self.path.display());
                Ok(default_config)
            }
        }
    }
}

/// Applies environment overrides. Blank values are ignored.
pub fn apply_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = value(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(level) = value(ENV_LOG) {
        config.logging.level = level;
    }
}
