use std::sync::Arc;

use crate::db::storage::{load_json_or_default, save_json, KeyValueStore, StorageResult};
use crate::models::{CreateSavedQuery, SavedQuery, UpdateSavedQuery};

pub const SAVED_QUERIES_KEY: &str = "savedQueries";

pub struct SavedQueryStore {
    store: Arc<dyn KeyValueStore>,
    queries: Vec<SavedQuery>,
}

impl SavedQueryStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let queries: Vec<SavedQuery> = load_json_or_default(store.as_ref(), SAVED_QUERIES_KEY);
        SavedQueryStore { store, queries }
    }

    pub fn create(&mut self, query: CreateSavedQuery) -> StorageResult<SavedQuery> {
        let now = chrono::Utc::now().to_rfc3339();
        let saved = SavedQuery {
            id: uuid::Uuid::new_v4().to_string(),
            name: query.name,
            folder: query.folder,
            query_text: query.query_text,
            created_at: now.clone(),
            updated_at: now,
        };

        self.queries.push(saved.clone());
        self.persist()?;
        log::info!("Saved query '{}'", saved.name);

        Ok(saved)
    }

    /// All saved queries ordered by name
    pub fn list(&self) -> Vec<SavedQuery> {
        let mut queries = self.queries.clone();
        queries.sort_by(|a, b| a.name.cmp(&b.name));
        queries
    }

    pub fn get(&self, query_id: &str) -> Option<&SavedQuery> {
        self.queries.iter().find(|q| q.id == query_id)
    }

    /// Apply the fields present in `update`. Returns the updated query, or
    /// `None` when the id is unknown.
    pub fn update(&mut self, update: &UpdateSavedQuery) -> StorageResult<Option<SavedQuery>> {
        let Some(query) = self.queries.iter_mut().find(|q| q.id == update.id) else {
            return Ok(None);
        };

        if let Some(ref name) = update.name {
            query.name = name.clone();
        }
        if let Some(ref folder) = update.folder {
            query.folder = Some(folder.clone());
        }
        if let Some(ref query_text) = update.query_text {
            query.query_text = query_text.clone();
        }
        query.updated_at = chrono::Utc::now().to_rfc3339();

        let updated = query.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    pub fn delete(&mut self, query_id: &str) -> StorageResult<bool> {
        let before = self.queries.len();
        self.queries.retain(|q| q.id != query_id);
        if self.queries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> StorageResult<()> {
        save_json(self.store.as_ref(), SAVED_QUERIES_KEY, &self.queries)
    }
}
