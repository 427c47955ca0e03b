use serde::Serialize;

use crate::error::ChartDataError;
use crate::models::{display_value, Row};

/// Bar colours, cycled by row position.
pub const CHART_PALETTE: [&str; 10] = [
    "#8884d8", "#83a6ed", "#8dd1e1", "#82ca9d", "#a4de6c", "#d0ed57", "#ffc658", "#ff8042",
    "#ff6361", "#bc5090",
];

pub const DEFAULT_CHART_ROW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    /// `None` when a later row holds a non-numeric value in the value column
    pub value: Option<f64>,
    pub color: &'static str,
}

/// Build a bar series from the first column (labels) and the first numeric
/// column (values), looking at no more than `limit` rows in original order.
pub fn chart_series(rows: &[Row], limit: usize) -> Result<Vec<ChartPoint>, ChartDataError> {
    let first = rows.first().ok_or(ChartDataError::NoResults)?;

    let label_column = first.keys().next().ok_or(ChartDataError::NoNumericColumn)?;
    let value_column = first
        .iter()
        .find(|(_, value)| value.is_number())
        .map(|(name, _)| name)
        .ok_or(ChartDataError::NoNumericColumn)?;

    let points = rows
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, row)| ChartPoint {
            label: display_value(row.get(label_column)),
            value: row.get(value_column).and_then(|v| v.as_f64()),
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rows(value: Value) -> Vec<Row> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn uses_first_column_and_first_numeric_column() {
        let data = rows(json!([
            { "region": "North", "code": "N", "revenue": 10, "units": 3 },
            { "region": "South", "code": "S", "revenue": 20.5, "units": 4 }
        ]));
        let series = chart_series(&data, DEFAULT_CHART_ROW_LIMIT).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "North");
        assert_eq!(series[0].value, Some(10.0));
        assert_eq!(series[1].value, Some(20.5));
        assert_eq!(series[1].color, CHART_PALETTE[1]);
    }

    #[test]
    fn caps_rows_and_cycles_palette() {
        let data: Vec<Row> = (0..25)
            .map(|i| json!({ "n": format!("r{}", i), "v": i }).as_object().cloned().unwrap())
            .collect();
        let series = chart_series(&data, 10).unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series[9].label, "r9");

        let series = chart_series(&data, 12).unwrap();
        assert_eq!(series[10].color, CHART_PALETTE[0]);
        assert_eq!(series[11].color, CHART_PALETTE[1]);
    }

    #[test]
    fn reports_missing_numeric_column() {
        let data = rows(json!([{ "a": "x", "b": "1" }]));
        assert_eq!(
            chart_series(&data, 10),
            Err(ChartDataError::NoNumericColumn)
        );
    }

    #[test]
    fn numeric_column_is_chosen_from_first_row_only() {
        let data = rows(json!([
            { "a": "x", "b": null, "c": 5 },
            { "a": "y", "b": 7, "c": "n/a" }
        ]));
        let series = chart_series(&data, 10).unwrap();
        assert_eq!(series[0].value, Some(5.0));
        assert_eq!(series[1].value, None);
    }

    #[test]
    fn reports_empty_results() {
        assert_eq!(chart_series(&[], 10), Err(ChartDataError::NoResults));
    }
}
