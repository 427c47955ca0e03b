use serde_json::json;

use crate::error::CatalogError;
use crate::models::{QueryRecord, ResultSet, Value};

/// Turns query text into a result set.
///
/// The built-in [`Catalog`] answers from canned data; a real execution engine
/// can be substituted without touching the presentation pipeline.
pub trait QueryResolver: Send + Sync {
    fn resolve(&self, text: &str) -> QueryRecord;

    /// Records offered in the template picker
    fn templates(&self) -> Vec<QueryRecord> {
        Vec::new()
    }
}

/// Fixed list of canned query/result pairs.
///
/// Unknown queries are answered with the first entry's rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<QueryRecord>,
}

impl Catalog {
    pub fn new(records: Vec<QueryRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Catalog { records })
    }

    /// Load records from a JSON array of `{ "name", "query", "results" }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<QueryRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn builtin() -> Self {
        Catalog {
            records: builtin_records(),
        }
    }

    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    fn default_record(&self) -> &QueryRecord {
        // Construction guarantees at least one record
        &self.records[0]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QueryResolver for Catalog {
    fn resolve(&self, text: &str) -> QueryRecord {
        let wanted = text.trim();
        if let Some(found) = self.records.iter().find(|r| r.identity() == wanted) {
            log::debug!("Catalog hit: {}", found.name);
            return found.clone();
        }

        log::debug!("No catalog entry for query, answering with default dataset");
        QueryRecord {
            query_text: text.to_string(),
            ..self.default_record().clone()
        }
    }

    fn templates(&self) -> Vec<QueryRecord> {
        self.records.iter().skip(1).take(3).cloned().collect()
    }
}

fn rows(value: Value) -> ResultSet {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn builtin_records() -> Vec<QueryRecord> {
    vec![
        QueryRecord::new(
            "All customers",
            "SELECT * FROM customers;",
            rows(json!([
                { "id": 1, "name": "Alice Johnson", "email": "alice@example.com", "city": "Seattle", "active": true },
                { "id": 2, "name": "Bob Smith", "email": "bob@example.com", "city": "Austin", "active": true },
                { "id": 3, "name": "Carol White", "email": "carol@example.com", "city": "Boston", "active": false },
                { "id": 4, "name": "David Brown", "email": "david@example.com", "city": "Denver", "active": true },
                { "id": 5, "name": "Eve Davis", "email": "eve@example.com", "city": "Chicago", "active": true },
                { "id": 6, "name": "Frank Miller", "email": "frank@example.com", "city": "Portland", "active": false },
                { "id": 7, "name": "Grace Lee", "email": "grace@example.com", "city": "Seattle", "active": true },
                { "id": 8, "name": "Henry Wilson", "email": "henry@example.com", "city": "Miami", "active": true },
                { "id": 9, "name": "Ivy Moore", "email": "ivy@example.com", "city": "Atlanta", "active": false },
                { "id": 10, "name": "Jack Taylor", "email": "jack@example.com", "city": "Dallas", "active": true },
                { "id": 11, "name": "Karen Anderson", "email": null, "city": "Phoenix", "active": true },
                { "id": 12, "name": "Leo Thomas", "email": "leo@example.com", "city": "Boston", "active": true }
            ])),
        ),
        QueryRecord::new(
            "Recent orders",
            "SELECT order_id, customer, total, status FROM orders ORDER BY created_at DESC LIMIT 8;",
            rows(json!([
                { "order_id": 1008, "customer": "Grace Lee", "total": 129.99, "status": "shipped" },
                { "order_id": 1007, "customer": "Bob Smith", "total": 42.5, "status": "pending" },
                { "order_id": 1006, "customer": "Alice Johnson", "total": 310.0, "status": "delivered" },
                { "order_id": 1005, "customer": "Eve Davis", "total": 18.75, "status": "cancelled" },
                { "order_id": 1004, "customer": "Jack Taylor", "total": 89.0, "status": "shipped" },
                { "order_id": 1003, "customer": "Leo Thomas", "total": 240.1, "status": "delivered" },
                { "order_id": 1002, "customer": "David Brown", "total": 65.3, "status": "pending" },
                { "order_id": 1001, "customer": "Henry Wilson", "total": 12.0, "status": "delivered" }
            ])),
        ),
        QueryRecord::new(
            "Product inventory",
            "SELECT sku, product, category, stock FROM products WHERE stock < 50;",
            rows(json!([
                { "sku": "KB-101", "product": "Mechanical Keyboard", "category": "Peripherals", "stock": 12 },
                { "sku": "MS-220", "product": "Wireless Mouse", "category": "Peripherals", "stock": 35 },
                { "sku": "MN-330", "product": "27\" Monitor", "category": "Displays", "stock": 7 },
                { "sku": "HD-440", "product": "USB-C Hub, 7 ports", "category": "Accessories", "stock": 44 },
                { "sku": "CB-550", "product": "HDMI Cable", "category": "Accessories", "stock": 3 }
            ])),
        ),
        QueryRecord::new(
            "Revenue by region",
            "SELECT region, SUM(revenue) AS revenue FROM sales GROUP BY region;",
            rows(json!([
                { "region": "North", "revenue": 152000 },
                { "region": "South", "revenue": 98000 },
                { "region": "East", "revenue": 187500 },
                { "region": "West", "revenue": 121250 },
                { "region": "Central", "revenue": 76400 }
            ])),
        ),
        QueryRecord::new(
            "Support notes",
            "SELECT ticket, note FROM support_notes;",
            rows(json!([
                { "ticket": "T-1", "note": "Customer asked for a refund, \"urgent\"" },
                { "ticket": "T-2", "note": "Resolved:\nreplaced device" },
                { "ticket": "T-3", "note": null }
            ])),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            QueryRecord::new("first", "SELECT 1", rows(json!([{ "a": 1 }]))),
            QueryRecord::new("second", "  SELECT 2  ", rows(json!([{ "b": 2 }]))),
            QueryRecord::new("duplicate", "SELECT 2", rows(json!([{ "c": 3 }]))),
        ])
        .unwrap()
    }

    #[test]
    fn exact_trimmed_match_wins_in_catalog_order() {
        let record = catalog().resolve("\n SELECT 2 \t");
        assert_eq!(record.name, "second");
        assert_eq!(record.result_set[0]["b"], json!(2));
    }

    #[test]
    fn unknown_query_echoes_default_dataset() {
        let catalog = catalog();
        let record = catalog.resolve("X");
        assert_eq!(record.query_text, "X");
        assert_eq!(record.name, "first");
        assert_eq!(record.result_set, catalog.records()[0].result_set);
    }

    #[test]
    fn unmatched_input_is_kept_untrimmed() {
        let record = catalog().resolve("  select   1 ");
        assert_eq!(record.query_text, "  select   1 ");
        assert_eq!(record.name, "first");
    }

    #[test]
    fn match_is_case_sensitive() {
        let record = catalog().resolve("select 2");
        assert_eq!(record.name, "first");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn loads_catalog_from_json() {
        let catalog = Catalog::from_json(
            r#"[{"name":"n","query":"SHOW tables","results":[{"t":"users"}]}]"#,
        )
        .unwrap();
        let record = catalog.resolve("SHOW tables");
        assert_eq!(record.name, "n");
        assert_eq!(record.result_set.len(), 1);

        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn builtin_templates_skip_default_entry() {
        let catalog = Catalog::builtin();
        let templates = catalog.templates();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0], catalog.records()[1]);
        assert_eq!(templates[2], catalog.records()[3]);
    }

    #[test]
    fn builtin_rows_keep_column_order() {
        let catalog = Catalog::builtin();
        let first = &catalog.records()[0].result_set[0];
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "email", "city", "active"]);
    }
}
