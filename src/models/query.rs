use serde::{Deserialize, Serialize};

/// A single cell value. Rows only ever carry scalars: strings, numbers,
/// booleans and null.
pub type Value = serde_json::Value;

/// Column name to value, in column order.
pub type Row = serde_json::Map<String, Value>;

pub type ResultSet = Vec<Row>;

/// A named query together with the rows it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub name: String,
    #[serde(rename = "query")]
    pub query_text: String,
    #[serde(rename = "results", default)]
    pub result_set: ResultSet,
}

impl QueryRecord {
    pub fn new(
        name: impl Into<String>,
        query_text: impl Into<String>,
        result_set: ResultSet,
    ) -> Self {
        QueryRecord {
            name: name.into(),
            query_text: query_text.into(),
            result_set,
        }
    }

    /// Text used to decide whether two runs are the same query.
    pub fn identity(&self) -> &str {
        self.query_text.trim()
    }
}

/// Characters of query text shown in history and saved-query listings.
pub const PREVIEW_CHARS: usize = 60;

/// First [`PREVIEW_CHARS`] characters of `query_text`, with `...` appended
/// when anything was cut.
pub fn query_preview(query_text: &str) -> String {
    match query_text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &query_text[..cut]),
        None => query_text.to_string(),
    }
}

/// Column names, taken from the first row in their stored order.
pub fn columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Text form of a present, non-null value.
///
/// Floats with no fractional part print without a trailing `.0`, so `310.0`
/// and `310` read the same in every view.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map(|f| f.to_string())
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Cell text as shown in the table: missing and null cells are blank.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => format_scalar(v),
    }
}
