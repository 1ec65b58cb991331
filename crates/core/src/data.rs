//! Data source seam.
//!
//! Deck construction can pull tabular or JSON data from an external source.
//! The result is a [`DataSet`]; how it is fetched is up to the implementor.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One row of tabular data, keyed by column name.
pub type Record = Map<String, Value>;

/// Where a data set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Csv,
    Excel,
    Json,
    Api,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Json => "json",
            Self::Api => "api",
        };
        f.write_str(name)
    }
}

/// Normalized result of a data fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Source identifier as requested (path or URL).
    pub source: String,
    pub kind: DataKind,
    /// Column names, in source order. Empty for non-tabular payloads.
    pub columns: Vec<String>,
    /// Rows keyed by column name.
    pub records: Vec<Record>,
    /// Original JSON payload for JSON and API sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl DataSet {
    /// Tabular data set with the given columns and rows.
    pub fn tabular(
        source: impl Into<String>,
        kind: DataKind,
        columns: Vec<String>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            columns,
            records,
            raw: None,
            sheet_name: None,
            status_code: None,
        }
    }

    /// Data set from a JSON payload.
    ///
    /// An array of objects is also exposed as records. Columns are the keys
    /// of every object, in the order they first appear.
    pub fn from_json(source: impl Into<String>, kind: DataKind, payload: Value) -> Self {
        let records: Vec<Record> = match &payload {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect(),
            _ => Vec::new(),
        };
        let mut columns: Vec<String> = Vec::new();
        for key in records.iter().flat_map(|record| record.keys()) {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }

        Self {
            source: source.into(),
            kind,
            columns,
            records,
            raw: Some(payload),
            sheet_name: None,
            status_code: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Values of one column, skipping rows that lack it.
    pub fn column_values(&self, name: &str) -> Vec<&Value> {
        self.records.iter().filter_map(|row| row.get(name)).collect()
    }

    /// Values of one column as text.
    pub fn text_column(&self, name: &str) -> Vec<String> {
        self.column_values(name).into_iter().map(text_value).collect()
    }

    /// Values of one column as numbers. Numeric strings are parsed; other
    /// values count as zero.
    pub fn numeric_column(&self, name: &str) -> Vec<f64> {
        self.column_values(name).into_iter().map(numeric_value).collect()
    }

    /// Label and value read from the same row, for every row that has both.
    pub fn label_value_pairs(&self, label: &str, value: &str) -> (Vec<String>, Vec<f64>) {
        self.records
            .iter()
            .filter_map(|row| match (row.get(label), row.get(value)) {
                (Some(l), Some(v)) if !l.is_null() && !v.is_null() => {
                    Some((text_value(l), numeric_value(v)))
                }
                _ => None,
            })
            .unzip()
    }
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Something that can fetch a data set by source identifier.
pub trait DataSource {
    /// Fetch the data behind `source` (a file path or URL).
    fn fetch(&mut self, source: &str) -> Result<DataSet>;

    /// Drop any cached results.
    fn clear_cache(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_array_of_objects() {
        let payload = json!([
            {"region": "North", "sales": 10},
            {"region": "South", "sales": "20.5"}
        ]);
        let data = DataSet::from_json("sales.json", DataKind::Json, payload);

        assert_eq!(data.row_count(), 2);
        assert!(data.has_column("region"));
        assert_eq!(data.text_column("region"), vec!["North", "South"]);
        assert_eq!(data.numeric_column("sales"), vec![10.0, 20.5]);
    }

    #[test]
    fn test_from_json_object_payload() {
        let data = DataSet::from_json("api", DataKind::Api, json!({"total": 3}));
        assert_eq!(data.row_count(), 0);
        assert!(data.columns.is_empty());
        assert_eq!(data.raw, Some(json!({"total": 3})));
    }

    #[test]
    fn test_columns_from_every_row() {
        let payload = json!([
            {"region": "North"},
            {"region": "South", "sales": 20}
        ]);
        let data = DataSet::from_json("sales.json", DataKind::Json, payload);
        assert_eq!(data.columns, vec!["region", "sales"]);
    }

    #[test]
    fn test_label_value_pairs_stay_aligned() {
        let payload = json!([
            {"region": "North"},
            {"region": "South", "sales": 20},
            {"sales": 5},
            {"region": "West", "sales": null},
            {"region": "East", "sales": "7.5"}
        ]);
        let data = DataSet::from_json("sales.json", DataKind::Json, payload);

        let (labels, values) = data.label_value_pairs("region", "sales");
        assert_eq!(labels, vec!["South", "East"]);
        assert_eq!(values, vec![20.0, 7.5]);
    }

    #[test]
    fn test_missing_column_is_empty() {
        let data = DataSet::tabular("x.csv", DataKind::Csv, vec![], vec![]);
        assert!(data.column_values("nope").is_empty());
    }
}
