//! JSON-backed keyed collection
//!
//! A `JsonCollection<T>` holds records in a `BTreeMap` keyed by snowflake
//! id (so iteration order is creation order) behind one `RwLock`. Every
//! mutation happens under the write lock and flushes the whole collection
//! to `<data_dir>/<name>.json` before releasing it, which is the
//! single-writer discipline the workflow relies on. With no data
//! directory the collection is memory-only.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use market_core::error::DomainError;
use market_core::value_objects::Snowflake;

/// A record addressable by snowflake key
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn key(&self) -> Snowflake;
}

/// One logical collection, stored as a single JSON array
pub struct JsonCollection<T: Record> {
    name: &'static str,
    path: Option<PathBuf>,
    entries: RwLock<BTreeMap<i64, T>>,
}

impl<T: Record> JsonCollection<T> {
    /// Open a collection, loading `<data_dir>/<name>.json` when present
    ///
    /// An absent file reads as the empty collection; only a file that
    /// exists but cannot be parsed is an error.
    pub fn open(name: &'static str, data_dir: Option<&Path>) -> Result<Self, DomainError> {
        let path = data_dir.map(|dir| dir.join(format!("{name}.json")));

        let mut entries = BTreeMap::new();
        if let Some(path) = &path {
            if path.exists() {
                let raw = fs::read_to_string(path)
                    .map_err(|e| DomainError::StorageError(format!("read {name}: {e}")))?;
                let records: Vec<T> = serde_json::from_str(&raw)
                    .map_err(|e| DomainError::StorageError(format!("parse {name}: {e}")))?;
                for record in records {
                    entries.insert(record.key().into_inner(), record);
                }
            }
        }

        debug!(collection = name, loaded = entries.len(), "collection opened");

        Ok(Self {
            name,
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Memory-only collection (tests and ephemeral runs)
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Look up one record by key
    pub fn get(&self, id: Snowflake) -> Option<T> {
        self.entries.read().get(&id.into_inner()).cloned()
    }

    /// All records in creation (key) order
    pub fn values(&self) -> Vec<T> {
        self.entries.read().values().cloned().collect()
    }

    /// Records matching a predicate, in creation order
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        self.entries
            .read()
            .values()
            .filter(|record| pred(record))
            .cloned()
            .collect()
    }

    /// Insert or replace one record, then flush
    pub fn upsert(&self, record: T) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        entries.insert(record.key().into_inner(), record);
        self.flush(&entries)
    }

    /// Remove one record, then flush; false when the key was absent
    pub fn remove(&self, id: Snowflake) -> Result<bool, DomainError> {
        let mut entries = self.entries.write();
        let removed = entries.remove(&id.into_inner()).is_some();
        if removed {
            self.flush(&entries)?;
        }
        Ok(removed)
    }

    /// Mutate records in place under one write lock, then flush once
    ///
    /// `f` returns true when it changed the record; the number of changed
    /// records is returned and nothing is flushed when that number is
    /// zero. This is what makes conversation-wide read marking atomic
    /// from the caller's point of view.
    pub fn mutate_all(&self, mut f: impl FnMut(&mut T) -> bool) -> Result<u64, DomainError> {
        let mut entries = self.entries.write();
        let mut changed = 0u64;
        for record in entries.values_mut() {
            if f(record) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.flush(&entries)?;
        }
        Ok(changed)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn flush(&self, entries: &BTreeMap<i64, T>) -> Result<(), DomainError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let records: Vec<&T> = entries.values().collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| DomainError::StorageError(format!("encode {}: {e}", self.name)))?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .map_err(|e| DomainError::StorageError(format!("create {}: {e}", dir.display())))?;

        // Write-to-temp then rename so a crash mid-flush never leaves a
        // half-written collection behind.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| DomainError::StorageError(format!("tempfile for {}: {e}", self.name)))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| DomainError::StorageError(format!("write {}: {e}", self.name)))?;
        tmp.persist(path)
            .map_err(|e| DomainError::StorageError(format!("persist {}: {e}", self.name)))?;

        Ok(())
    }
}
