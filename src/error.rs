use thiserror::Error;

/// Rejected query text. Raised before the catalog is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Query cannot be empty")]
    Empty,
    #[error("Query must start with a valid SQL keyword (SELECT, INSERT, etc.)")]
    MissingKeyword,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Storage lock poisoned")]
    Lock,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No results to export")]
    EmptyExport,
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the chart view has nothing to draw. Shown inline, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartDataError {
    #[error("No results to display")]
    NoResults,
    #[error("No numeric data to chart")]
    NoNumericColumn,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one query")]
    Empty,
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(String),
    #[error("Saved query not found: {0}")]
    SavedQueryNotFound(String),
    #[error("Template not found at index {0}")]
    TemplateNotFound(usize),
}

pub type WorkbenchResult<T> = Result<T, WorkbenchError>;
