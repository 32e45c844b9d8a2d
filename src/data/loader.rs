//! Spreadsheet Loader Module
//! Reads Excel workbooks (via calamine) and CSV files (via Polars) into a DataFrame.

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read workbook: {0}")]
    WorkbookError(#[from] calamine::Error),
    #[error("Worksheet '{0}' not found")]
    SheetNotFound(String),
    #[error("Workbook has no worksheets")]
    NoSheets,
    #[error("File has no data rows")]
    Empty,
    #[error("Unsupported file type: {0}")]
    Unsupported(String),
}

/// Supported input formats, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub const WORKBOOK_EXTENSIONS: [&'static str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext == "csv" {
            Ok(SourceFormat::Csv)
        } else if Self::WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceFormat::Workbook)
        } else {
            Err(LoaderError::Unsupported(path.display().to_string()))
        }
    }
}

/// Loads a whole spreadsheet into memory.
pub struct DataLoader {
    sheet: Option<String>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DataLoader {
    /// `sheet` selects a worksheet by name; `None` reads the first one.
    pub fn new(sheet: Option<String>) -> Self {
        Self { sheet }
    }

    /// Load a spreadsheet, choosing the reader by extension.
    pub fn load(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let df = match SourceFormat::from_path(path)? {
            SourceFormat::Csv => Self::load_csv(path)?,
            SourceFormat::Workbook => self.load_workbook(path)?,
        };

        if df.width() == 0 {
            return Err(LoaderError::Empty);
        }

        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "spreadsheet loaded"
        );
        Ok(df)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let path_str = path.to_string_lossy().to_string();
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Load one worksheet of an Excel/ODS workbook.
    pub fn load_workbook(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = match &self.sheet {
            Some(name) if sheet_names.contains(name) => name.clone(),
            Some(name) => return Err(LoaderError::SheetNotFound(name.clone())),
            None => sheet_names.first().cloned().ok_or(LoaderError::NoSheets)?,
        };
        tracing::debug!(sheet = %sheet_name, "reading worksheet");

        let range = workbook.worksheet_range(&sheet_name)?;
        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        Self::frame_from_rows(&rows)
    }

    /// Build a DataFrame from raw cell rows; the first row is the header.
    pub fn frame_from_rows(rows: &[Vec<Data>]) -> Result<DataFrame, LoaderError> {
        let Some((header, body)) = rows.split_first() else {
            return Err(LoaderError::Empty);
        };

        let headers = unique_headers(header);
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&Data> = body
                    .iter()
                    .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                    .collect();
                build_column(name, &cells)
            })
            .collect::<Vec<_>>();

        Ok(DataFrame::new(columns)?)
    }
}

/// Header names with blanks filled in and duplicates suffixed.
fn unique_headers(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell_text(cell) {
                Some(text) if !text.trim().is_empty() => text.trim().to_string(),
                _ => format!("column_{}", idx + 1),
            };

            let mut name = base.clone();
            let mut counter = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}_{}", base, counter);
                counter += 1;
            }
            name
        })
        .collect()
}

/// Numeric columns become Float64, everything else String.
fn build_column(name: &str, cells: &[&Data]) -> Column {
    let all_numeric = cells
        .iter()
        .filter(|cell| !matches!(cell, Data::Empty))
        .all(|cell| matches!(cell, Data::Float(_) | Data::Int(_)));

    if all_numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Float(f) => Some(*f),
                Data::Int(i) => Some(*i as f64),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|cell| cell_text(cell)).collect();
        Column::new(name.into(), values)
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
    }
}
