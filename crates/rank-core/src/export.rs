// File: crates/rank-core/src/export.rs
// Summary: CSV and spreadsheet export of record collections.
// Notes:
// - Empty input is a silent no-op (Ok(None)); the dashboard's export
//   buttons simply do nothing when a table is empty.
// - Filenames carry a UTC date stamp, overridable through options so tests
//   and reproducible exports can pin a date.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::column::Column;
use crate::error::ExportError;
use crate::record::{Record, Scalar};
use crate::types::WidthLimits;

/// MIME type of CSV output.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
/// MIME type of spreadsheet output.
pub const SHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Sheet name for spreadsheet output.
    pub sheet_name: String,
    /// Filename date stamp; today (UTC) when unset.
    pub stamp: Option<NaiveDate>,
    /// Spreadsheet column sizing.
    pub widths: WidthLimits,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Export".to_string(),
            stamp: None,
            widths: WidthLimits::default(),
        }
    }
}

impl ExportOptions {
    fn stamp(&self) -> NaiveDate {
        self.stamp.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// A finished export: date-stamped filename, MIME type, file bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the file under `dir` (created if missing); returns the path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

fn resolve_display(column: &Column, record: &Record) -> Result<String, ExportError> {
    column.display(record).map_err(|source| ExportError::Column {
        header: column.header.clone(),
        source,
    })
}

/// Serialize `records` x `columns` as RFC-4180-style CSV, header row first,
/// named `<stem>_<YYYY-MM-DD>.csv`. Cells containing a comma, quote, or
/// newline are quoted with internal quotes doubled (the csv crate's default
/// quoting). Empty input produces no file.
pub fn export_csv(
    records: &[Record],
    columns: &[Column],
    stem: &str,
    opts: &ExportOptions,
) -> Result<Option<ExportFile>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.header.as_str()))?;
    for record in records {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            row.push(resolve_display(column, record)?);
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    let file = ExportFile {
        name: format!("{stem}_{}.csv", opts.stamp().format("%Y-%m-%d")),
        content_type: CSV_CONTENT_TYPE,
        bytes,
    };
    debug!(name = %file.name, rows = records.len(), "csv export complete");
    Ok(Some(file))
}

/// Serialize `records` x `columns` as a single-sheet .xlsx workbook named
/// `<stem>_<YYYY-MM-DD>.xlsx`. Unformatted Number cells are written as
/// native numbers; everything else is written as its display string. Column
/// widths are sized to the widest cell (capped, plus padding). Empty input
/// produces no file.
pub fn export_sheet(
    records: &[Record],
    columns: &[Column],
    stem: &str,
    opts: &ExportOptions,
) -> Result<Option<ExportFile>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&opts.sheet_name)?;

    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.chars().count()).collect();
    for (col, column) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, &column.header)?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, column) in columns.iter().enumerate() {
            let cell = column.cell(record).map_err(|source| ExportError::Column {
                header: column.header.clone(),
                source,
            })?;
            let display = match &column.format {
                Some(f) => f(&cell),
                None => cell.display(),
            };
            widths[col] = widths[col].max(display.chars().count());

            // A formatter output is by definition a display string; only an
            // unformatted Number keeps its native type.
            match (&cell, &column.format) {
                (Scalar::Number(v), None) => {
                    sheet.write_number(row as u32 + 1, col as u16, *v)?;
                }
                _ => {
                    sheet.write_string(row as u32 + 1, col as u16, &display)?;
                }
            }
        }
    }

    for (col, measured) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, opts.widths.fit(*measured) as f64)?;
    }

    let bytes = workbook.save_to_buffer()?;
    let file = ExportFile {
        name: format!("{stem}_{}.xlsx", opts.stamp().format("%Y-%m-%d")),
        content_type: SHEET_CONTENT_TYPE,
        bytes,
    };
    debug!(name = %file.name, rows = records.len(), "sheet export complete");
    Ok(Some(file))
}
