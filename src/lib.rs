pub mod commands;
pub mod db;
pub mod error;
pub mod models;
mod state;

pub use db::{Catalog, KeyValueStore, MemoryStore, QueryResolver, SqliteStore};
pub use error::{WorkbenchError, WorkbenchResult};
pub use state::{QueryListItem, TableBody, TableView, ViewContent, Workbench};

/// Set up logging for the host application.
///
/// `RUST_LOG` overrides `level` when set. Calling this more than once is
/// harmless; only the first logger is installed.
pub fn init_logging(level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    if result.is_ok() {
        log::debug!("Logging initialized at {}", level);
    }
}

/// Open a workbench backed by the SQLite store in `app_data_dir`, using the
/// built-in catalog and writing exports to `download_dir`.
pub fn open_workbench(
    app_data_dir: &std::path::Path,
    download_dir: &std::path::Path,
) -> WorkbenchResult<Workbench> {
    let store = SqliteStore::open(app_data_dir)?;
    Ok(Workbench::with_builtin_catalog(
        std::sync::Arc::new(store),
        Box::new(commands::DirectorySink::new(download_dir)),
    ))
}
