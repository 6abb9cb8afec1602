//! `LocalStore` implementations.
//!
//! [`FileLocalStore`] keeps every key in one JSON object on disk. A file
//! that no longer parses reads as empty and is replaced on the next write.
//! [`InMemoryLocalStore`] is for tests and for running without a data
//! directory.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

use caseload_core::Result;
use caseload_core::state::LocalStore;

use crate::paths::{CaseloadPaths, ServiceType};
use crate::storage::{AtomicFile, AtomicFileError, FileFormat};

type Entries = BTreeMap<String, String>;

pub struct FileLocalStore {
    file: AtomicFile<Entries>,
    // Serializes writers within this process; the file lock covers the rest.
    write_guard: Mutex<()>,
}

impl FileLocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json),
            write_guard: Mutex::new(()),
        }
    }

    /// Store at the default location, or under `dir` when one is configured.
    pub fn from_paths(paths: &CaseloadPaths, dir: Option<PathBuf>) -> Result<Self> {
        let path = match dir {
            Some(dir) => dir.join("local_store.json"),
            None => paths.get_path(ServiceType::LocalStore)?,
        };
        tracing::debug!("Local store at {}", path.display());
        Ok(Self::new(path))
    }

    fn update<R>(&self, f: impl FnOnce(&mut Entries) -> R) -> Result<R> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.file.update_or_reset(Entries::new(), f)?)
    }

    fn entries(&self) -> Result<Entries> {
        match self.file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(AtomicFileError::FormatError { message, .. }) => {
                tracing::warn!(
                    "Ignoring unreadable local store {}: {}",
                    self.file.path().display(),
                    message
                );
                Ok(Entries::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLocalStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}
