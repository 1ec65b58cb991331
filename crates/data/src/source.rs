//! File and URL data source with a per-source cache.

use crate::workbook::WorkbookReader;
use deck_core::{DataKind, DataSet, DataSource, Error, Record, Result};
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Kind of source, detected from the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    Csv,
    Xlsx,
    Xls,
    Json,
}

impl SourceKind {
    /// Detect the source kind from a URL scheme or file extension.
    pub fn detect(source: &str) -> Option<Self> {
        let lower = source.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(Self::Url)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else if lower.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else if lower.ends_with(".xls") {
            Some(Self::Xls)
        } else if lower.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Fetches CSV, Excel and JSON files and HTTP(S) JSON endpoints.
///
/// Successful fetches are cached by source string until
/// [`DataSource::clear_cache`] is called.
#[derive(Debug, Default)]
pub struct FileDataSource {
    cache: HashMap<String, DataSet>,
}

impl FileDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached data sets.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn fetch_uncached(&self, source: &str) -> Result<DataSet> {
        match SourceKind::detect(source) {
            Some(SourceKind::Url) => crate::http::fetch_url(source),
            Some(SourceKind::Csv) => read_csv(source),
            Some(SourceKind::Xlsx | SourceKind::Xls) => read_workbook(source),
            Some(SourceKind::Json) => read_json(source),
            None => Err(Error::UnsupportedSource(format!(
                "Unsupported data source format: {}",
                source
            ))),
        }
    }
}

impl DataSource for FileDataSource {
    fn fetch(&mut self, source: &str) -> Result<DataSet> {
        if let Some(cached) = self.cache.get(source) {
            log::info!("Using cached data from {}", source);
            return Ok(cached.clone());
        }

        let data = self.fetch_uncached(source)?;
        self.cache.insert(source.to_string(), data.clone());
        Ok(data)
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
        log::info!("Cleared data cache");
    }
}

fn ensure_exists(path: &Path, label: &str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::DataSourceError(format!(
            "{} file not found: {}",
            label,
            path.display()
        )))
    }
}

/// Read a CSV file. The header row names the columns; numeric cells become
/// numbers and empty cells become nulls.
fn read_csv(source: &str) -> Result<DataSet> {
    let path = Path::new(source);
    ensure_exists(path, "CSV")?;

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::CsvError(format!("Failed to open {}: {}", source, e)))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| Error::CsvError(format!("Failed to read header of {}: {}", source, e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::CsvError(format!("{}: {}", source, e)))?;
        let record: Record = columns
            .iter()
            .zip(row.iter())
            .map(|(column, field)| (column.clone(), infer_value(field)))
            .collect();
        records.push(record);
    }

    log::info!(
        "Fetched CSV data from {}: {} rows, {} columns",
        source,
        records.len(),
        columns.len()
    );
    Ok(DataSet::tabular(source, DataKind::Csv, columns, records))
}

/// Read the first worksheet of an Excel workbook; its first row is the header.
fn read_workbook(source: &str) -> Result<DataSet> {
    let path = Path::new(source);
    ensure_exists(path, "Excel")?;

    let sheet = WorkbookReader::new().read_first_sheet(path)?;

    let mut rows = sheet.rows.into_iter();
    let columns: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::String(s) => s,
            Value::Null => format!("column_{}", i + 1),
            other => other.to_string(),
        })
        .collect();

    let records: Vec<Record> = rows
        .map(|row| {
            columns
                .iter()
                .cloned()
                .zip(row.into_iter().chain(std::iter::repeat(Value::Null)))
                .collect()
        })
        .collect();

    log::info!(
        "Fetched Excel data from {}: {} rows, {} columns",
        source,
        records.len(),
        columns.len()
    );

    let mut data = DataSet::tabular(source, DataKind::Excel, columns, records);
    data.sheet_name = sheet.name;
    Ok(data)
}

fn read_json(source: &str) -> Result<DataSet> {
    let path = Path::new(source);
    ensure_exists(path, "JSON")?;

    let file = File::open(path)?;
    let payload: Value = serde_json::from_reader(BufReader::new(file))?;

    log::info!("Fetched JSON data from {}", source);
    Ok(DataSet::from_json(source, DataKind::Json, payload))
}

/// Convert a CSV field to the narrowest JSON value that represents it.
fn infer_value(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(field.to_string()))
}
