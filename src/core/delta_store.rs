//! Persistence of previous measurements for delta checks.
//!
//! Plugins run as short-lived processes, so the value a [`DeltaContext`] compares
//! against has to survive between invocations. The store hands out
//! [`SharedPrevious`] cells and writes their final values back on [`DeltaStore::save`].
//!
//! [`DeltaContext`]: super::context::DeltaContext

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::context::SharedPrevious;
use crate::error::{NagkitError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaEntry {
    pub value: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DeltaStore {
    path: PathBuf,
    entries: BTreeMap<String, DeltaEntry>,
    cells: Vec<(String, SharedPrevious)>,
}

impl DeltaStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable one is
    /// discarded with a warning.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&data).unwrap_or_else(|e| {
                    log::warn!("discarding unreadable delta store {:?}: {}", path, e);
                    BTreeMap::new()
                })
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries,
            cells: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value for `key`, as of the last save.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.entries.get(key).map(|entry| entry.value)
    }

    pub fn updated_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.updated_at)
    }

    /// Cell seeded with the stored value for `key`. Repeated calls share one cell.
    pub fn previous(&mut self, key: &str) -> SharedPrevious {
        if let Some((_, cell)) = self.cells.iter().find(|(k, _)| k == key) {
            return cell.clone();
        }

        let cell = SharedPrevious::new(self.value(key));
        self.cells.push((key.to_string(), cell.clone()));
        cell
    }

    /// Write back every cell handed out by [`DeltaStore::previous`].
    pub fn save(&mut self) -> Result<()> {
        let now = Utc::now();
        for (key, cell) in &self.cells {
            let Some(value) = cell.get() else { continue };
            if self.entries.get(key).map(|entry| entry.value) != Some(value) {
                self.entries.insert(
                    key.clone(),
                    DeltaEntry {
                        value,
                        updated_at: now,
                    },
                );
            }
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NagkitError::state_store(format!(
                    "failed to create state directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data).map_err(|e| {
            NagkitError::state_store(format!("failed to write {:?}: {}", self.path, e))
        })?;

        log::debug!("saved {} delta entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }
}
