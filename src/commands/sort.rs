use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

use crate::models::{format_scalar, Row, SortDirection, Value, ViewState};

/// Unicode collator for text cells: CLDR root order with punctuation kept
/// significant, so `a_b` sorts before `a1` and `éclair` between `apple` and
/// `fig`.
pub fn text_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// String form used when values are not both numbers.
///
/// Missing cells become `"undefined"` and nulls become `"null"`, so they sort
/// among ordinary text rather than at either end.
pub fn sort_key(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => format_scalar(v).to_lowercase(),
    }
}

/// Ascending comparison of two cells.
///
/// Two numbers compare numerically; anything else compares the lowercased
/// text forms with `collator`.
pub fn compare_values(collator: &mut Collator, a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }

    collator.collate(sort_key(a).as_str(), sort_key(b).as_str())
}

/// Return a copy of `rows` ordered by `column`.
pub fn sort_rows(rows: &[Row], column: &str, direction: SortDirection) -> Vec<Row> {
    let mut collator = text_collator();
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(&mut collator, a.get(column), b.get(column));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Rows in the order the view currently presents them.
pub fn apply_sort(rows: &[Row], view: &ViewState) -> Vec<Row> {
    match view.sort_column.as_deref() {
        Some(column) => sort_rows(rows, column, view.sort_direction),
        None => rows.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn column(rows: &[Row], name: &str) -> Vec<Value> {
        rows.iter()
            .map(|r| r.get(name).cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn numbers_compare_numerically() {
        let data = rows(json!([{ "n": 10 }, { "n": 9 }, { "n": 100 }, { "n": -1.5 }]));
        let sorted = sort_rows(&data, "n", SortDirection::Asc);
        assert_eq!(column(&sorted, "n"), vec![json!(-1.5), json!(9), json!(10), json!(100)]);
    }

    #[test]
    fn strings_compare_case_insensitively() {
        let data = rows(json!([{ "s": "banana" }, { "s": "Apple" }, { "s": "cherry" }]));
        let sorted = sort_rows(&data, "s", SortDirection::Asc);
        assert_eq!(
            column(&sorted, "s"),
            vec![json!("Apple"), json!("banana"), json!("cherry")]
        );
    }

    #[test]
    fn accented_text_sorts_with_its_base_letter() {
        let data = rows(json!([
            { "s": "fig" },
            { "s": "éclair" },
            { "s": "apple" },
            { "s": "Zoë" },
            { "s": "eclipse" }
        ]));
        let sorted = sort_rows(&data, "s", SortDirection::Asc);
        assert_eq!(
            column(&sorted, "s"),
            vec![json!("apple"), json!("éclair"), json!("eclipse"), json!("fig"), json!("Zoë")]
        );
    }

    #[test]
    fn punctuation_sorts_before_digits_and_letters() {
        let data = rows(json!([{ "s": "ab" }, { "s": "a1" }, { "s": "a_b" }]));
        let sorted = sort_rows(&data, "s", SortDirection::Asc);
        assert_eq!(column(&sorted, "s"), vec![json!("a_b"), json!("a1"), json!("ab")]);
    }

    #[test]
    fn descending_reverses_distinct_values() {
        let data = rows(json!([{ "s": "b" }, { "s": "d" }, { "s": "a" }, { "s": "c" }]));
        let asc = sort_rows(&data, "s", SortDirection::Asc);
        let desc = sort_rows(&asc, "s", SortDirection::Desc);
        let mut reversed = column(&asc, "s");
        reversed.reverse();
        assert_eq!(column(&desc, "s"), reversed);
    }

    #[test]
    fn null_and_missing_sort_as_their_literal_text() {
        let data = rows(json!([
            { "v": "zebra" },
            { "v": null },
            {},
            { "v": "alpha" },
            { "v": "nz" }
        ]));
        let sorted = sort_rows(&data, "v", SortDirection::Asc);
        // "alpha" < "null" < "nz" < "undefined" < "zebra"
        assert_eq!(
            sorted.iter().map(|r| sort_key(r.get("v"))).collect::<Vec<_>>(),
            vec!["alpha", "null", "nz", "undefined", "zebra"]
        );
    }

    #[test]
    fn mixed_number_and_text_falls_back_to_string_order() {
        let data = rows(json!([{ "v": 9 }, { "v": "10" }]));
        let sorted = sort_rows(&data, "v", SortDirection::Asc);
        // "10" < "9" as text
        assert_eq!(column(&sorted, "v"), vec![json!("10"), json!(9)]);
    }

    #[test]
    fn sorting_leaves_input_untouched() {
        let data = rows(json!([{ "n": 2 }, { "n": 1 }]));
        let _ = sort_rows(&data, "n", SortDirection::Asc);
        assert_eq!(column(&data, "n"), vec![json!(2), json!(1)]);
    }

    #[test]
    fn apply_sort_without_column_keeps_order() {
        let data = rows(json!([{ "n": 2 }, { "n": 1 }]));
        let view = ViewState::default();
        assert_eq!(apply_sort(&data, &view), data);

        let mut view = ViewState::default();
        view.toggle_sort("n");
        assert_eq!(column(&apply_sort(&data, &view), "n"), vec![json!(1), json!(2)]);
    }
}
