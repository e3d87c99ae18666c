//! In-memory table backed by one JSON file
//!
//! Every repository keeps its rows in a `Table`. Rows live in an
//! `RwLock<HashMap>` and the whole table is rewritten atomically on save.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_json, write_json_atomic};

/// A row type that can live in a [`Table`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Key: Clone + Eq + Hash + Ord;

    fn key(&self) -> Self::Key;
}

/// On-disk layout of a table file
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
struct TableFile<R: Record> {
    #[serde(default)]
    rows: Vec<R>,
}

impl<R: Record> Default for TableFile<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

pub struct Table<R: Record> {
    path: PathBuf,
    rows: RwLock<HashMap<R::Key, R>>,
}

impl<R: Record> Table<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn read(&self) -> LedgerResult<RwLockReadGuard<'_, HashMap<R::Key, R>>> {
        self.rows
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    pub(crate) fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, HashMap<R::Key, R>>> {
        self.rows
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory rows with the file contents
    pub fn load(&self) -> LedgerResult<()> {
        let file: TableFile<R> = read_json(&self.path)?;
        let mut rows = self.write()?;
        rows.clear();
        rows.extend(file.rows.into_iter().map(|r| (r.key(), r)));
        Ok(())
    }

    /// Write all rows to disk, ordered by key so the file diffs cleanly
    pub fn save(&self) -> LedgerResult<()> {
        let rows = self.read()?;
        let mut list: Vec<R> = rows.values().cloned().collect();
        list.sort_by_key(|r| r.key());
        write_json_atomic(&self.path, &TableFile { rows: list })
    }

    pub fn get(&self, key: &R::Key) -> LedgerResult<Option<R>> {
        Ok(self.read()?.get(key).cloned())
    }

    /// All rows matching `pred`, in no particular order
    pub fn select(&self, pred: impl Fn(&R) -> bool) -> LedgerResult<Vec<R>> {
        Ok(self.read()?.values().filter(|r| pred(r)).cloned().collect())
    }

    pub fn find(&self, pred: impl Fn(&R) -> bool) -> LedgerResult<Option<R>> {
        Ok(self.read()?.values().find(|r| pred(r)).cloned())
    }

    pub fn count(&self, pred: impl Fn(&R) -> bool) -> LedgerResult<usize> {
        Ok(self.read()?.values().filter(|r| pred(r)).count())
    }

    pub fn upsert(&self, row: R) -> LedgerResult<()> {
        self.write()?.insert(row.key(), row);
        Ok(())
    }

    pub fn remove(&self, key: &R::Key) -> LedgerResult<Option<R>> {
        Ok(self.write()?.remove(key))
    }
}
