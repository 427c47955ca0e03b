use std::sync::Arc;

use crate::db::storage::{load_json_or_default, save_json, KeyValueStore, StorageResult};
use crate::models::{QueryHistoryEntry, QueryRecord};

/// Storage key holding the JSON array of history entries.
pub const HISTORY_KEY: &str = "queryHistory";

pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Most-recent-first log of distinct queries that were run.
///
/// Loaded once when the workbench opens; every change rewrites the whole list.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<QueryHistoryEntry>,
    max_entries: usize,
}

impl HistoryStore {
    /// Load persisted history. A missing or unreadable value starts an empty
    /// history instead of failing.
    pub fn load(store: Arc<dyn KeyValueStore>, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        let mut entries: Vec<QueryHistoryEntry> = load_json_or_default(store.as_ref(), HISTORY_KEY);
        entries.truncate(max_entries);
        log::debug!("Loaded {} history entries", entries.len());

        HistoryStore {
            store,
            entries,
            max_entries,
        }
    }

    pub fn entries(&self) -> &[QueryHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, entry_id: &str) -> Option<&QueryHistoryEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn contains_query(&self, query_text: &str) -> bool {
        let wanted = query_text.trim();
        self.entries.iter().any(|e| e.query_text.trim() == wanted)
    }

    /// Add a run to the front of the history unless the same query text is
    /// already present. Returns whether an entry was added.
    pub fn record(&mut self, record: &QueryRecord, now_millis: i64) -> StorageResult<bool> {
        if self.contains_query(&record.query_text) {
            return Ok(false);
        }

        let mut entry = QueryHistoryEntry::from_record(record, now_millis);
        entry.id = self.unused_id(now_millis);

        self.entries.insert(0, entry);
        self.entries.truncate(self.max_entries);
        self.persist()?;

        Ok(true)
    }

    /// Remove the entry with `entry_id`. Returns whether one was found.
    pub fn delete(&mut self, entry_id: &str) -> StorageResult<bool> {
        let Some(index) = self.entries.iter().position(|e| e.id == entry_id) else {
            return Ok(false);
        };
        self.entries.remove(index);
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> StorageResult<()> {
        self.entries.clear();
        self.persist()
    }

    /// Apply a new cap, dropping the oldest entries if needed.
    pub fn set_max_entries(&mut self, max_entries: usize) -> StorageResult<()> {
        self.max_entries = max_entries.max(1);
        if self.entries.len() > self.max_entries {
            self.entries.truncate(self.max_entries);
            self.persist()?;
        }
        Ok(())
    }

    /// `query_<millis>`, moved past any id already taken in the same
    /// millisecond.
    fn unused_id(&self, now_millis: i64) -> String {
        let mut millis = now_millis;
        loop {
            let id = format!("query_{}", millis);
            if self.get(&id).is_none() {
                return id;
            }
            millis = millis.saturating_add(1);
        }
    }

    fn persist(&self) -> StorageResult<()> {
        save_json(self.store.as_ref(), HISTORY_KEY, &self.entries)
    }
}
