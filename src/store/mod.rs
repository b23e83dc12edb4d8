//! Persistent support-matrix data store
//!
//! The store maps container name → release → [`Record`] and is kept as one
//! JSON document. Saves are atomic (write to a tmp file, then rename), so a
//! crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractorError, Result};
use crate::model::Record;

/// Releases recorded for one container
pub type Releases = BTreeMap<String, Record>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataStore {
    containers: BTreeMap<String, Releases>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single record
    pub fn single(container: &str, release: &str, record: Record) -> Self {
        let mut store = Self::new();
        store.insert(container, release, record);
        store
    }

    /// Load the store from `path`; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No data store at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let data = std::fs::read_to_string(path).map_err(|e| store_error(path, e))?;
        serde_json::from_str(&data).map_err(|e| store_error(path, e))
    }

    /// Write the whole store to `path` with sorted keys and two-space
    /// indentation
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
        }

        let mut json = serde_json::to_string_pretty(self).map_err(|e| store_error(path, e))?;
        json.push('\n');

        let tmp_path = tmp_path(path);
        std::fs::write(&tmp_path, &json).map_err(|e| store_error(&tmp_path, e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| store_error(path, e))?;

        debug!("Saved data store to {}", path.display());
        Ok(())
    }

    /// Make sure `container`/`release` exists, creating empty levels as needed
    pub fn ensure_entry(&mut self, container: &str, release: &str) -> &mut Record {
        self.containers
            .entry(container.to_string())
            .or_default()
            .entry(release.to_string())
            .or_default()
    }

    /// Put `record` at `container`/`release`, replacing any previous record
    pub fn insert(&mut self, container: &str, release: &str, record: Record) {
        *self.ensure_entry(container, release) = record;
    }

    /// Overlay `incoming` onto this store
    ///
    /// Containers and releases present on only one side are kept. Where both
    /// sides hold a record for the same container and release, the incoming
    /// record replaces the existing one.
    pub fn merge(&mut self, incoming: DataStore) {
        for (container, releases) in incoming.containers {
            let existing = self.containers.entry(container).or_default();
            for (release, record) in releases {
                existing.insert(release, record);
            }
        }
    }

    pub fn get(&self, container: &str, release: &str) -> Option<&Record> {
        self.containers.get(container)?.get(release)
    }

    pub fn releases(&self, container: &str) -> Option<&Releases> {
        self.containers.get(container)
    }

    /// Number of container/release records
    pub fn len(&self) -> usize {
        self.containers.values().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn store_error(path: &Path, reason: impl std::fmt::Display) -> ExtractorError {
    ExtractorError::Store {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
