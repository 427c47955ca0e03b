pub mod catalog;
pub mod sqlite;
pub mod storage;

pub use catalog::{Catalog, QueryResolver};
pub use sqlite::SqliteStore;
pub use storage::{KeyValueStore, MemoryStore};
