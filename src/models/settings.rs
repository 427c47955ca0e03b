use serde::{Deserialize, Serialize};

use super::{PageSize, ViewMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultsSettings {
    pub default_page_size: PageSize,
    pub default_view_mode: ViewMode,
    /// Render a scrolling window instead of discrete pages
    pub virtualize: bool,
    pub row_height: u32,
    pub container_height: u32,
    pub overscan: usize,
    pub chart_row_limit: usize,
}

impl Default for ResultsSettings {
    fn default() -> Self {
        ResultsSettings {
            default_page_size: PageSize::Ten,
            default_view_mode: ViewMode::Table,
            virtualize: false,
            row_height: 40,
            container_height: 400,
            overscan: 2,
            chart_row_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistorySettings {
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings { max_entries: 10 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchSettings {
    pub results: ResultsSettings,
    pub history: HistorySettings,
    pub export: ExportSettings,
}
