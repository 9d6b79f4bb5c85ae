//! Tabular rule sources.
//!
//! # Responsibilities
//! - Read a workbook from wherever rules are maintained
//! - Turn each sheet into header-keyed raw rows
//! - Report an unreadable source as `SourceError`, never panic
//!
//! The spreadsheet reader is backed by calamine, so `.xlsx`, `.xls`,
//! `.xlsb` and `.ods` files all work.

use std::collections::HashMap;
use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::rules::error::SourceError;
use crate::rules::rule::RawRow;

/// A source of tabular rule data.
pub trait TabularSource: Send + Sync + 'static {
    /// Human-readable location, used in logs.
    fn location(&self) -> String;

    /// Read the whole workbook. Blocking.
    fn read(&self) -> Result<Workbook, SourceError>;
}

/// One sheet's data rows, keyed by the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub rows: Vec<RawRow>,
}

impl Sheet {
    /// Build a sheet from a header row plus data rows.
    ///
    /// Empty header cells are ignored, rows with no content are skipped and
    /// short rows read as empty strings.
    pub fn from_grid<I, R, S>(header: &[S], rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[String]>,
        S: AsRef<str>,
    {
        let header: Vec<&str> = header.iter().map(|h| h.as_ref().trim()).collect();

        let rows = rows
            .into_iter()
            .filter(|cells| cells.as_ref().iter().any(|c| !c.trim().is_empty()))
            .map(|cells| {
                let cells = cells.as_ref();
                header
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| !name.is_empty())
                    .map(|(i, name)| {
                        let value = cells.get(i).cloned().unwrap_or_default();
                        (name.to_string(), value)
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }
}

/// Sheet names in workbook order plus the sheets that could be read.
///
/// A name may be listed without a matching entry in `sheets`.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheet_names: Vec<String>,
    sheets: HashMap<String, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: Sheet) -> Self {
        let name = name.into();
        self.sheet_names.push(name.clone());
        self.sheets.insert(name, sheet);
        self
    }

    /// List a sheet name without data.
    pub fn with_unreadable_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet_names.push(name.into());
        self
    }

    pub fn first_sheet_name(&self) -> Option<&str> {
        self.sheet_names.first().map(String::as_str)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }
}

/// Spreadsheet file on disk, re-read on every call.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabularSource for XlsxSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Workbook, SourceError> {
        let mut reader = open_workbook_auto(&self.path).map_err(|e| SourceError::Unreadable {
            path: self.location(),
            reason: e.to_string(),
        })?;

        let mut workbook = Workbook::new();
        for name in reader.sheet_names() {
            match reader.worksheet_range(&name) {
                Ok(range) => workbook = workbook.with_sheet(name, sheet_from_range(&range)),
                Err(e) => {
                    tracing::warn!(sheet = %name, error = %e, "Unreadable worksheet");
                    workbook = workbook.with_unreadable_sheet(name);
                }
            }
        }

        Ok(workbook)
    }
}

fn sheet_from_range(range: &Range<Data>) -> Sheet {
    let mut rows = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<Vec<String>>());

    match rows.next() {
        Some(header) => Sheet::from_grid(&header, rows),
        None => Sheet::default(),
    }
}

// Integral floats display without a fraction ("301", not "301.0").
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
