use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Json,
    Chart,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Table => write!(f, "table"),
            ViewMode::Json => write!(f, "json"),
            ViewMode::Chart => write!(f, "chart"),
        }
    }
}

/// Rows per page offered by the results footer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::Hundred),
            other => Err(format!("Unsupported page size: {}", other)),
        }
    }
}

/// Presentation state of the results panel.
///
/// Owned by the workbench and threaded through the pure result functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub view_mode: ViewMode,
    /// 1-based
    pub current_page: usize,
    pub page_size: PageSize,
}

impl ViewState {
    pub fn new(view_mode: ViewMode, page_size: PageSize) -> Self {
        ViewState {
            sort_column: None,
            sort_direction: SortDirection::Asc,
            view_mode,
            current_page: 1,
            page_size,
        }
    }

    /// Forget sorting and paging after a new result set is loaded.
    pub fn reset_for_new_results(&mut self) {
        self.sort_column = None;
        self.sort_direction = SortDirection::Asc;
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Apply a click on a column header.
    ///
    /// The same column flips direction; another column becomes active in
    /// ascending order.
    pub fn toggle_sort(&mut self, column: &str) {
        if self.sort_column.as_deref() == Some(column) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(ViewMode::default(), PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_same_column_toggles_direction() {
        let mut view = ViewState::default();
        view.toggle_sort("name");
        assert_eq!(view.sort_column.as_deref(), Some("name"));
        assert_eq!(view.sort_direction, SortDirection::Asc);

        view.toggle_sort("name");
        assert_eq!(view.sort_direction, SortDirection::Desc);

        view.toggle_sort("name");
        assert_eq!(view.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn clicking_other_column_resets_to_ascending() {
        let mut view = ViewState::default();
        view.toggle_sort("name");
        view.toggle_sort("name");
        view.toggle_sort("age");
        assert_eq!(view.sort_column.as_deref(), Some("age"));
        assert_eq!(view.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut view = ViewState::default();
        view.toggle_sort("name");
        view.current_page = 4;
        view.set_page_size(PageSize::Fifty);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.page_size.get(), 50);
        assert_eq!(view.sort_column.as_deref(), Some("name"));
    }

    #[test]
    fn new_results_clear_sort_and_page() {
        let mut view = ViewState::new(ViewMode::Chart, PageSize::TwentyFive);
        view.toggle_sort("id");
        view.toggle_sort("id");
        view.current_page = 3;
        view.reset_for_new_results();
        assert_eq!(view.sort_column, None);
        assert_eq!(view.sort_direction, SortDirection::Asc);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.view_mode, ViewMode::Chart);
        assert_eq!(view.page_size, PageSize::TwentyFive);
    }

    #[test]
    fn page_size_accepts_only_offered_values() {
        assert_eq!(PageSize::try_from(25), Ok(PageSize::TwentyFive));
        assert!(PageSize::try_from(20).is_err());
        let json = serde_json::to_string(&PageSize::Hundred).unwrap();
        assert_eq!(json, "100");
        let parsed: PageSize = serde_json::from_str("50").unwrap();
        assert_eq!(parsed, PageSize::Fifty);
    }
}
