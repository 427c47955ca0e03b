use serde::{Deserialize, Serialize};

use super::{query_preview, QueryRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistoryEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "query")]
    pub query_text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl QueryHistoryEntry {
    pub fn from_record(record: &QueryRecord, now_millis: i64) -> Self {
        QueryHistoryEntry {
            id: format!("query_{}", now_millis),
            name: record.name.clone(),
            query_text: record.query_text.clone(),
            timestamp: now_millis,
        }
    }

    /// Title for the history list; entries saved without a name get a
    /// placeholder.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed Query"
        } else {
            &self.name
        }
    }

    pub fn preview(&self) -> String {
        query_preview(&self.query_text)
    }
}
