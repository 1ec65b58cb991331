//! First-worksheet reader for Excel workbooks (`.xlsx`, `.xlsm`, `.xls`).

use calamine::{open_workbook_auto, Data, Reader};
use deck_core::{Error, Result};
use serde_json::{Number, Value};
use std::path::Path;

/// Cell values of one worksheet, row by row.
#[derive(Debug, Default)]
pub struct Sheet {
    pub name: Option<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Reads the first worksheet of a workbook; the format follows the file
/// extension.
#[derive(Debug, Default, Clone)]
pub struct WorkbookReader;

impl WorkbookReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_first_sheet(&self, path: &Path) -> Result<Sheet> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            Error::DataSourceError(format!("Failed to open workbook {}: {}", path.display(), e))
        })?;

        let name = workbook.sheet_names().first().cloned().ok_or_else(|| {
            Error::DataSourceError(format!("Workbook {} has no sheets", path.display()))
        })?;
        log::debug!("Reading worksheet {} from {}", name, path.display());

        let range = workbook.worksheet_range(&name).map_err(|e| {
            Error::DataSourceError(format!(
                "Failed to read sheet {} of {}: {}",
                name,
                path.display(),
                e
            ))
        })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        Ok(Sheet {
            name: Some(name),
            rows,
        })
    }
}

/// Whole numbers become integers; empty and error cells become null.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::from(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(*f as i64),
        Data::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

/// Small two-column workbook whose first sheet lives at a non-default path.
#[cfg(test)]
pub(crate) fn sample_workbook() -> Vec<u8> {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/data.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#,
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Q1" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/data.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#,
        ),
        (
            "xl/sharedStrings.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4"><si><t>region</t></si><si><t>sales</t></si><si><t>North</t></si><si><t>South</t></si></sst>"#,
        ),
        (
            "xl/worksheets/data.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row><row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>10</v></c></row><row r="3"><c r="A3" t="s"><v>3</v></c><c r="B3"><v>20.5</v></c></row></sheetData></worksheet>"#,
        ),
    ];
    for (name, body) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_value(&Data::Float(10.0)), Value::from(10));
        assert_eq!(cell_value(&Data::Float(20.5)), Value::from(20.5));
        assert_eq!(cell_value(&Data::Float(f64::NAN)), Value::Null);
        assert_eq!(cell_value(&Data::Int(-3)), Value::from(-3));
        assert_eq!(cell_value(&Data::String("North".into())), Value::from("North"));
        assert_eq!(cell_value(&Data::Bool(true)), Value::Bool(true));
    }

    #[test]
    fn test_read_first_sheet_follows_relationship() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q1.xlsx");
        fs::write(&path, sample_workbook()).unwrap();

        let sheet = WorkbookReader::new().read_first_sheet(&path).unwrap();

        assert_eq!(sheet.name.as_deref(), Some("Q1"));
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1], vec![Value::from("North"), Value::from(10)]);
        assert_eq!(sheet.rows[2], vec![Value::from("South"), Value::from(20.5)]);
    }

    #[test]
    fn test_not_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["plain.xlsx", "plain.xls"] {
            let path = dir.path().join(name);
            fs::write(&path, b"plain text").unwrap();

            let result = WorkbookReader::new().read_first_sheet(&path);
            assert!(
                matches!(result, Err(Error::DataSourceError(ref msg)) if msg.contains("Failed to open workbook")),
                "{}: {:?}",
                name,
                result
            );
        }
    }
}
