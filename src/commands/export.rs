use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::models::{columns, format_scalar, Row, Value};

pub const JSON_FILE_NAME: &str = "JSONResults.json";
pub const CSV_FILE_NAME: &str = "csvResults.csv";

/// A file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// `data:` link carrying the percent-encoded contents.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};charset=utf-8,{}",
            self.mime_type,
            urlencoding::encode(&self.contents)
        )
    }
}

/// Somewhere finished exports are delivered (a browser download, a folder).
pub trait DownloadSink: Send + Sync {
    fn deliver(&self, file: &ExportFile) -> Result<(), ExportError>;
}

/// Writes exports into a directory under their fixed file names.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, file: &ExportFile) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file.file_name);

        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(file.contents.as_bytes())?;
        writer.flush()?;

        log::info!("Exported {} bytes to {}", file.contents.len(), path.display());
        Ok(())
    }
}

/// Serialize the full result set, in its original order.
pub fn to_json(rows: &[Row], pretty: bool) -> Result<String, ExportError> {
    let json = if pretty {
        serde_json::to_string_pretty(rows)?
    } else {
        serde_json::to_string(rows)?
    };
    Ok(json)
}

/// Escape a single CSV cell.
///
/// Quotes are doubled and newlines flattened to spaces. The field is quoted
/// when the original text held a comma, quote or newline.
pub fn escape_csv_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(v) => format_scalar(v),
    };

    let needs_quotes = text.contains(|c: char| matches!(c, ',' | '"' | '\n'));
    let escaped = text.replace('"', "\"\"").replace('\n', " ");

    if needs_quotes {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Render rows as CSV with a header taken from the first row.
pub fn to_csv(rows: &[Row]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::EmptyExport);
    }

    let headers = columns(rows);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));

    for row in rows {
        let line = headers
            .iter()
            .map(|header| escape_csv_field(row.get(header)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

pub fn json_export(rows: &[Row], pretty: bool) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        file_name: JSON_FILE_NAME,
        mime_type: "application/json",
        contents: to_json(rows, pretty)?,
    })
}

pub fn csv_export(rows: &[Row]) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        file_name: CSV_FILE_NAME,
        mime_type: "text/csv",
        contents: to_csv(rows)?,
    })
}
