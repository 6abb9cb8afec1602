//! Atomic file operations for the client's durable files.
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so a reader never sees a half-written file. Read-modify-write
//! updates hold an exclusive lock on a sibling `.lock` file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use caseload_core::CaseloadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

#[derive(Debug)]
pub enum AtomicFileError {
    IoError(std::io::Error),
    /// Parse or serialization failure, tagged with the format.
    FormatError { format: FileFormat, message: String },
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::FormatError { format, message } => {
                write!(f, "{:?} error: {}", format, message)
            }
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<AtomicFileError> for CaseloadError {
    fn from(err: AtomicFileError) -> Self {
        match err {
            AtomicFileError::IoError(e) => e.into(),
            AtomicFileError::FormatError { format, message } => CaseloadError::Serialization {
                format: format!("{:?}", format).to_uppercase(),
                message,
            },
            AtomicFileError::LockError(message) => CaseloadError::io(message),
        }
    }
}

/// A handle to a file that is replaced atomically on every save.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and parses the file.
    ///
    /// A missing or blank file loads as `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = match self.format {
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| self.format_error(e))?,
            FileFormat::Toml => toml::from_str(&content).map_err(|e| self.format_error(e))?,
        };
        Ok(Some(data))
    }

    /// Writes `data` to a temp file, syncs it, then renames it into place.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let content = match self.format {
            FileFormat::Json => {
                serde_json::to_string_pretty(data).map_err(|e| self.format_error(e))?
            }
            FileFormat::Toml => toml::to_string_pretty(data).map_err(|e| self.format_error(e))?,
        };

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write. `f` returns whatever the caller needs back.
    pub fn update<R, F>(&self, default_value: T, f: F) -> Result<R, AtomicFileError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let out = f(&mut data);
        self.save(&data)?;

        Ok(out)
    }

    /// Like [`update`](Self::update), but a file that fails to parse is
    /// logged and replaced, starting from `default_value`.
    pub fn update_or_reset<R, F>(&self, default_value: T, f: F) -> Result<R, AtomicFileError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(loaded) => loaded.unwrap_or(default_value),
            Err(AtomicFileError::FormatError { message, .. }) => {
                tracing::warn!("Replacing unreadable {}: {}", self.path.display(), message);
                default_value
            }
            Err(e) => return Err(e),
        };
        let out = f(&mut data);
        self.save(&data)?;

        Ok(out)
    }

    fn format_error(&self, e: impl std::fmt::Display) -> AtomicFileError {
        AtomicFileError::FormatError {
            format: self.format,
            message: e.to_string(),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let invalid = |msg: &str| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                msg.to_string(),
            ))
        };
        let parent = self
            .path
            .parent()
            .ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| invalid("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock held for the lifetime of the guard.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let temp_dir = TempDir::new().unwrap();
        let sample = Sample {
            name: "test".to_string(),
            count: 42,
        };

        for (file, format) in [("a.json", FileFormat::Json), ("a.toml", FileFormat::Toml)] {
            let atomic = AtomicFile::<Sample>::new(temp_dir.path().join(file), format);
            atomic.save(&sample).unwrap();
            assert_eq!(atomic.load().unwrap(), Some(sample.clone()));
        }
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let atomic = AtomicFile::<Sample>::new(path.clone(), FileFormat::Json);
        assert!(atomic.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(atomic.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_a_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let atomic = AtomicFile::<Sample>::new(path, FileFormat::Json);
        let err = atomic.load().unwrap_err();
        assert!(matches!(err, AtomicFileError::FormatError { .. }));
        assert!(CaseloadError::from(err).is_serialization());
    }

    #[test]
    fn test_update_returns_closure_value_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("kv.json");
        let atomic = AtomicFile::<BTreeMap<String, String>>::new(path.clone(), FileFormat::Json);

        let previous = atomic
            .update(BTreeMap::new(), |map| map.insert("k".into(), "v1".into()))
            .unwrap();
        assert!(previous.is_none());

        let previous = atomic
            .update(BTreeMap::new(), |map| map.insert("k".into(), "v2".into()))
            .unwrap();
        assert_eq!(previous.as_deref(), Some("v1"));

        assert!(!temp_dir.path().join("nested").join(".kv.json.tmp").exists());
        assert!(!path.with_extension("lock").exists());
    }
}
