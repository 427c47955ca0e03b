use crate::db::storage::{load_json_or_default, save_json, KeyValueStore, StorageResult};
use crate::models::WorkbenchSettings;

pub const SETTINGS_KEY: &str = "workbenchSettings";

/// Load settings, returns default if none exist or the stored value is unreadable
pub fn load_settings(store: &dyn KeyValueStore) -> WorkbenchSettings {
    load_json_or_default(store, SETTINGS_KEY)
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &WorkbenchSettings) -> StorageResult<()> {
    save_json(store, SETTINGS_KEY, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn settings_round_trip_through_store() {
        let store = MemoryStore::new();
        assert_eq!(load_settings(&store), WorkbenchSettings::default());

        let mut settings = WorkbenchSettings::default();
        settings.results.virtualize = true;
        settings.export.pretty_json = true;
        save_settings(&store, &settings).unwrap();

        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let store = MemoryStore::with_value(SETTINGS_KEY, "[1,2");
        assert_eq!(load_settings(&store), WorkbenchSettings::default());
    }
}
