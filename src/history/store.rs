//! Persistence backends for the history log.

use crate::error::HistoryError;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Somewhere the history can be saved to and loaded from as a flat list of
/// strings, oldest first.
pub trait HistoryStore {
    /// Load all saved lines. An absent store is an empty list, not an error.
    fn load(&self) -> Result<Vec<String>, HistoryError>;

    /// Replace the saved lines with `entries`.
    fn save(&self, entries: &[String]) -> Result<(), HistoryError>;
}

/// History saved as a JSON array of strings.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/scicalc/history.json`, or the working directory when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("scicalc"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string(entries).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write to a sibling file, then rename over the real one.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

/// History kept only for the lifetime of the process.
///
/// Clones share the same lines.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryStore {
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Snapshot of the stored lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.lines())
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        *self.lines.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("history.json"));
        store.save(&["1+1 = 2".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), vec!["1+1 = 2".to_string()]);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(HistoryError::Corrupt { .. })));
    }

    #[test]
    fn test_memory_store_clones_share_lines() {
        let store = MemoryStore::default();
        let handle = store.clone();
        store.save(&["a = 1".to_string()]).unwrap();
        assert_eq!(handle.lines(), vec!["a = 1".to_string()]);
    }
}
