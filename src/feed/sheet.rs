//! Parsing of the vendor stock sheet into inventory records.
//!
//! The vendor publishes an `.xls` workbook with a preamble of roughly
//! seventeen rows before the table header. Rather than counting rows, the
//! header is located by its column titles. CSV exports of the same table are
//! accepted for manual runs.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use log::{debug, info};

use crate::error::{Result, SyncError};
use crate::models::InventoryRecord;

/// Column holding the vendor article code
pub const CODE_COLUMN: &str = "Код";
/// Column holding the quantity marker
pub const QUANTITY_COLUMN: &str = "Количество";
/// Column holding the decorated price
pub const PRICE_COLUMN: &str = "Цена";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    fn from_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(SheetFormat::Workbook),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(SyncError::FeedFormat(format!(
                "unsupported sheet type: {name}"
            ))),
        }
    }
}

/// Parses sheet `bytes`; the format is chosen from the extension of `name`.
pub fn parse_sheet(name: &str, bytes: Vec<u8>) -> Result<Vec<InventoryRecord>> {
    let rows = match SheetFormat::from_name(name)? {
        SheetFormat::Workbook => workbook_rows(bytes)?,
        SheetFormat::Csv => csv_rows(&bytes)?,
    };
    let records = records_from_rows(rows)?;
    info!("Parsed {} inventory records from {name}", records.len());
    Ok(records)
}

fn workbook_rows(bytes: Vec<u8>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::FeedFormat("workbook has no sheets".to_string()))??;
    Ok(range_rows(&range))
}

fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

/// Text of a cell as a person reads it: whole floats lose their `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (*f as i64).to_string()
        }
        other => other.to_string(),
    }
}

fn csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let delimiter = detect_delimiter(bytes);
    debug!("Reading CSV sheet with delimiter '{}'", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }
    Ok(rows)
}

/// Semicolon if the header line uses it, comma otherwise.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(bytes);
    let header = text
        .lines()
        .find(|line| line.contains(CODE_COLUMN))
        .unwrap_or_default();
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

struct Columns {
    code: usize,
    quantity: usize,
    price: usize,
}

impl Columns {
    fn find(row: &[String]) -> Option<Self> {
        let position = |title: &str| row.iter().position(|cell| cell == title);
        Some(Self {
            code: position(CODE_COLUMN)?,
            quantity: position(QUANTITY_COLUMN)?,
            price: position(PRICE_COLUMN)?,
        })
    }
}

/// Turns raw sheet rows into records, starting below the header row.
///
/// Rows without a code (blank lines, group captions) are skipped.
fn records_from_rows(rows: Vec<Vec<String>>) -> Result<Vec<InventoryRecord>> {
    let mut rows = rows.into_iter().enumerate();

    let columns = loop {
        match rows.next() {
            Some((index, row)) => {
                if let Some(columns) = Columns::find(&row) {
                    debug!("Found sheet header at row {index}");
                    break columns;
                }
            }
            None => {
                return Err(SyncError::FeedFormat(format!(
                    "header with columns {CODE_COLUMN}, {QUANTITY_COLUMN}, {PRICE_COLUMN} not found"
                )))
            }
        }
    };

    let field = |row: &[String], index: usize| row.get(index).cloned().unwrap_or_default();

    let mut records = Vec::new();
    for (_, row) in rows {
        let code = field(&row, columns.code);
        if code.is_empty() {
            continue;
        }
        records.push(InventoryRecord {
            code,
            quantity: field(&row, columns.quantity),
            price: field(&row, columns.price),
        });
    }
    Ok(records)
}

#[cfg(test)]
#[path = "sheet_tests.rs"]
mod tests;
