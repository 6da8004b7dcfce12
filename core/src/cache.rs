//! Normalized-table cache.
//!
//! RULE: the cache is the only holder of tables shared between viewer
//! sessions. An entry is immutable once inserted. Loading is idempotent,
//! so a racing duplicate load is wasted work, never corruption: the first
//! inserted entry wins and the loser's table is dropped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::{
    config::ReportConfig,
    error::ReportResult,
    loader::{self, NormalizedTable},
};

/// Memoizes normalized tables by source path.
#[derive(Default)]
pub struct TableCache {
    entries: RwLock<HashMap<PathBuf, Arc<NormalizedTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first request.
    pub fn load(
        &self,
        path: &Path,
        config: &ReportConfig,
    ) -> ReportResult<Arc<NormalizedTable>> {
        // Source identity: the canonical path when the file resolves,
        // the literal path otherwise (the load below reports the error).
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(table) = self.get(&key) {
            log::debug!("table cache hit for {}", key.display());
            return Ok(table);
        }

        // Load outside the lock; populate under it.
        let table = Arc::new(loader::load_transactions_file(&key, config)?);
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = entries.entry(key).or_insert(table);
        Ok(Arc::clone(entry))
    }

    fn get(&self, key: &Path) -> Option<Arc<NormalizedTable>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).map(Arc::clone)
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
