use std::sync::Arc;

use crate::commands::{
    apply_sort, chart_series, csv_export, json_export, load_settings, navigation, paginate,
    save_settings, to_json, validate_query, ChartPoint, DownloadSink, ExportFile, HistoryStore,
    Page, PageNavigation, RowWindow, SavedQueryStore, Viewport,
};
use crate::db::{Catalog, KeyValueStore, QueryResolver};
use crate::error::{ChartDataError, ExportError, WorkbenchError, WorkbenchResult};
use crate::models::{
    columns, display_value, CreateSavedQuery, PageSize, QueryHistoryEntry, QueryRecord, Row,
    SavedQuery, SortDirection, UpdateSavedQuery, ViewMode, ViewState, WorkbenchSettings,
};

/// What the results panel should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent<'a> {
    /// Nothing has been run yet
    NoQuery,
    /// A query ran and returned no rows
    NoResults,
    Table(TableView<'a>),
    /// Pretty-printed raw rows, in original order
    Json(String),
    Chart(Result<Vec<ChartPoint>, ChartDataError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub columns: Vec<String>,
    pub sort_column: Option<&'a str>,
    pub sort_direction: SortDirection,
    pub body: TableBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a> {
    Paged {
        page: Page<'a>,
        navigation: PageNavigation,
    },
    Windowed {
        rows: &'a [Row],
        window: RowWindow,
        /// Pixel offset of the first rendered row
        offset_top: u64,
        total_rows: usize,
    },
}

impl<'a> TableBody<'a> {
    pub fn rows(&self) -> &'a [Row] {
        match self {
            TableBody::Paged { page, .. } => page.rows,
            TableBody::Windowed { rows, .. } => rows,
        }
    }
}

impl TableView<'_> {
    /// Column title with the sort arrow when it is the active column
    pub fn header_label(&self, column: &str) -> String {
        match self.sort_column {
            Some(active) if active == column => {
                format!("{} {}", column, self.sort_direction.indicator())
            }
            _ => column.to_string(),
        }
    }

    pub fn cells(&self, row: &Row) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| display_value(row.get(column)))
            .collect()
    }
}

/// One entry in the history or saved-query list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryListItem {
    pub id: String,
    pub title: String,
    /// Start of the query text, cut at 60 characters
    pub preview: String,
}

/// The workbench session: the active result set, how it is being viewed, and
/// the persisted history, saved queries and settings.
pub struct Workbench {
    resolver: Box<dyn QueryResolver>,
    store: Arc<dyn KeyValueStore>,
    sink: Box<dyn DownloadSink>,

    settings: WorkbenchSettings,
    history: HistoryStore,
    saved_queries: SavedQueryStore,

    /// Text currently in the editor
    query_text: String,
    active_query: Option<QueryRecord>,
    /// Active rows in view order, rebuilt when the sort or results change
    sorted_rows: Vec<Row>,

    view: ViewState,
    viewport: Viewport,
    scroll_offset: u64,
}

impl Workbench {
    pub fn open(
        resolver: Box<dyn QueryResolver>,
        store: Arc<dyn KeyValueStore>,
        sink: Box<dyn DownloadSink>,
    ) -> Self {
        let settings = load_settings(store.as_ref());
        let history = HistoryStore::load(store.clone(), settings.history.max_entries);
        let saved_queries = SavedQueryStore::load(store.clone());

        log::info!(
            "Workbench opened with {} history entries and {} saved queries",
            history.entries().len(),
            saved_queries.list().len()
        );

        Workbench {
            resolver,
            store,
            sink,
            view: ViewState::new(
                settings.results.default_view_mode,
                settings.results.default_page_size,
            ),
            viewport: Viewport::from_settings(&settings.results),
            settings,
            history,
            saved_queries,
            query_text: String::new(),
            active_query: None,
            sorted_rows: Vec::new(),
            scroll_offset: 0,
        }
    }

    /// Open with the built-in canned catalog.
    pub fn with_builtin_catalog(
        store: Arc<dyn KeyValueStore>,
        sink: Box<dyn DownloadSink>,
    ) -> Self {
        Self::open(Box::new(Catalog::builtin()), store, sink)
    }

    // ==================== Queries ====================

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn active_query(&self) -> Option<&QueryRecord> {
        self.active_query.as_ref()
    }

    /// Validate, resolve and display `text`, recording it in history.
    ///
    /// On a validation error nothing changes.
    pub fn run_query(&mut self, text: &str) -> WorkbenchResult<&QueryRecord> {
        self.run_query_at(text, chrono::Utc::now().timestamp_millis())
    }

    /// Same as [`Workbench::run_query`] with an explicit clock reading.
    pub fn run_query_at(&mut self, text: &str, now_millis: i64) -> WorkbenchResult<&QueryRecord> {
        if let Err(e) = validate_query(text) {
            log::warn!("Rejected query: {}", e);
            return Err(e.into());
        }

        let record = self.resolver.resolve(text);
        log::info!(
            "Ran query '{}' ({} rows)",
            record.name,
            record.result_set.len()
        );

        match self.history.record(&record, now_millis) {
            Ok(true) => log::debug!("Added '{}' to history", record.identity()),
            Ok(false) => {}
            Err(e) => log::warn!("Failed to persist query history: {}", e),
        }

        self.query_text = text.to_string();
        Ok(self.load_results(record))
    }

    pub fn templates(&self) -> Vec<QueryRecord> {
        self.resolver.templates()
    }

    /// Show a template's canned results without running it or touching
    /// history.
    pub fn select_template(&mut self, index: usize) -> WorkbenchResult<&QueryRecord> {
        let record = self
            .resolver
            .templates()
            .into_iter()
            .nth(index)
            .ok_or(WorkbenchError::TemplateNotFound(index))?;

        self.query_text = record.query_text.clone();
        Ok(self.load_results(record))
    }

    fn load_results(&mut self, record: QueryRecord) -> &QueryRecord {
        self.view.reset_for_new_results();
        self.scroll_offset = 0;
        self.sorted_rows = record.result_set.clone();
        self.active_query.insert(record)
    }

    // ==================== History ====================

    pub fn history(&self) -> &[QueryHistoryEntry] {
        self.history.entries()
    }

    /// History entries as listed in the sidebar, most recent first.
    pub fn history_items(&self) -> Vec<QueryListItem> {
        self.history
            .entries()
            .iter()
            .map(|entry| QueryListItem {
                id: entry.id.clone(),
                title: entry.display_name().to_string(),
                preview: entry.preview(),
            })
            .collect()
    }

    pub fn rerun_history(&mut self, entry_id: &str) -> WorkbenchResult<&QueryRecord> {
        let query_text = self
            .history
            .get(entry_id)
            .map(|entry| entry.query_text.clone())
            .ok_or_else(|| WorkbenchError::HistoryEntryNotFound(entry_id.to_string()))?;
        self.run_query(&query_text)
    }

    pub fn delete_history_entry(&mut self, entry_id: &str) -> WorkbenchResult<bool> {
        Ok(self.history.delete(entry_id)?)
    }

    pub fn clear_history(&mut self) -> WorkbenchResult<()> {
        Ok(self.history.clear()?)
    }

    // ==================== Saved Queries ====================

    pub fn saved_queries(&self) -> Vec<SavedQuery> {
        self.saved_queries.list()
    }

    /// Saved queries as listed in the sidebar, ordered by name.
    pub fn saved_query_items(&self) -> Vec<QueryListItem> {
        self.saved_queries
            .list()
            .into_iter()
            .map(|query| QueryListItem {
                preview: query.preview(),
                id: query.id,
                title: query.name,
            })
            .collect()
    }

    /// Save the given query, defaulting to the editor's current text.
    pub fn save_query(
        &mut self,
        name: &str,
        folder: Option<String>,
    ) -> WorkbenchResult<SavedQuery> {
        let query = CreateSavedQuery {
            name: name.to_string(),
            folder,
            query_text: self.query_text.clone(),
        };
        Ok(self.saved_queries.create(query)?)
    }

    pub fn update_saved_query(&mut self, update: &UpdateSavedQuery) -> WorkbenchResult<SavedQuery> {
        self.saved_queries
            .update(update)?
            .ok_or_else(|| WorkbenchError::SavedQueryNotFound(update.id.clone()))
    }

    pub fn delete_saved_query(&mut self, query_id: &str) -> WorkbenchResult<bool> {
        Ok(self.saved_queries.delete(query_id)?)
    }

    pub fn run_saved_query(&mut self, query_id: &str) -> WorkbenchResult<&QueryRecord> {
        let query_text = self
            .saved_queries
            .get(query_id)
            .map(|q| q.query_text.clone())
            .ok_or_else(|| WorkbenchError::SavedQueryNotFound(query_id.to_string()))?;
        self.run_query(&query_text)
    }

    // ==================== View State ====================

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Active rows in the order they are displayed
    pub fn sorted_rows(&self) -> &[Row] {
        &self.sorted_rows
    }

    /// Handle a click on a column header.
    pub fn sort_by(&mut self, column: &str) {
        let Some(active) = self.active_query.as_ref() else {
            return;
        };
        if !columns(&active.result_set).iter().any(|c| c == column) {
            log::debug!("Ignoring sort on unknown column '{}'", column);
            return;
        }

        self.view.toggle_sort(column);
        self.sorted_rows = apply_sort(&active.result_set, &self.view);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.view.set_page_size(page_size);
    }

    /// Jump to a page, clamped to the pages that exist. Returns the page shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let page = paginate(&self.sorted_rows, self.view.page_size.get(), page).current_page;
        self.view.current_page = page;
        page
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view.view_mode = view_mode;
    }

    pub fn current_page(&self) -> Page<'_> {
        paginate(
            &self.sorted_rows,
            self.view.page_size.get(),
            self.view.current_page,
        )
    }

    // ==================== Virtualized Viewport ====================

    /// Record the measured container height. Safe to call repeatedly.
    pub fn resize_viewport(&mut self, container_height: u32) -> bool {
        self.viewport.resize(container_height)
    }

    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.viewport.max_scroll_offset(self.sorted_rows.len()));
    }

    pub fn visible_window(&self) -> RowWindow {
        self.viewport
            .visible_window(self.sorted_rows.len(), self.scroll_offset)
    }

    // ==================== Rendering ====================

    pub fn render(&self) -> ViewContent<'_> {
        let Some(active) = self.active_query.as_ref() else {
            return ViewContent::NoQuery;
        };
        if active.result_set.is_empty() {
            return ViewContent::NoResults;
        }

        match self.view.view_mode {
            ViewMode::Json => match to_json(&active.result_set, true) {
                Ok(json) => ViewContent::Json(json),
                Err(e) => {
                    log::error!("Failed to render results as JSON: {}", e);
                    ViewContent::Json(String::new())
                }
            },
            ViewMode::Chart => ViewContent::Chart(chart_series(
                &active.result_set,
                self.settings.results.chart_row_limit,
            )),
            ViewMode::Table => ViewContent::Table(TableView {
                columns: columns(&active.result_set),
                sort_column: self.view.sort_column.as_deref(),
                sort_direction: self.view.sort_direction,
                body: self.table_body(),
            }),
        }
    }

    fn table_body(&self) -> TableBody<'_> {
        if self.settings.results.virtualize {
            let window = self.visible_window();
            return TableBody::Windowed {
                rows: &self.sorted_rows[window.range()],
                offset_top: self.viewport.offset_of(&window),
                window,
                total_rows: self.sorted_rows.len(),
            };
        }

        let page = self.current_page();
        let navigation = navigation(page.current_page, page.total_pages);
        TableBody::Paged { page, navigation }
    }

    // ==================== Export ====================

    /// Export the active rows as JSON. Returns whether a file was delivered.
    pub fn export_json(&self) -> bool {
        let rows = self
            .active_query
            .as_ref()
            .map(|q| q.result_set.as_slice())
            .unwrap_or_default();
        self.deliver(json_export(rows, self.settings.export.pretty_json))
    }

    /// Export the active rows as CSV. Fails when there is nothing to export.
    pub fn export_csv(&self) -> bool {
        let rows = self
            .active_query
            .as_ref()
            .map(|q| q.result_set.as_slice())
            .unwrap_or_default();
        self.deliver(csv_export(rows))
    }

    fn deliver(&self, file: Result<ExportFile, ExportError>) -> bool {
        match file.and_then(|file| self.sink.deliver(&file)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Export failed: {}", e);
                false
            }
        }
    }

    // ==================== Settings ====================

    pub fn settings(&self) -> &WorkbenchSettings {
        &self.settings
    }

    /// Persist new settings and apply the parts that affect the open session.
    pub fn update_settings(&mut self, settings: WorkbenchSettings) -> WorkbenchResult<()> {
        save_settings(self.store.as_ref(), &settings)?;

        self.viewport = Viewport::from_settings(&settings.results);
        self.scroll_to(self.scroll_offset);
        self.history.set_max_entries(settings.history.max_entries)?;
        self.settings = settings;

        log::info!("Settings updated");
        Ok(())
    }
}
