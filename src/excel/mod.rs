//! Workbook loading: calamine ranges → `Grid`.
//!
//! The only module that touches spreadsheet-reader types; everything above
//! works on `Grid` and `CellValue`.

use crate::core::grid::Grid;
use crate::error::{ExtractError, ExtractResult};
use crate::types::CellValue;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// An open .xlsx workbook.
pub struct ExcelWorkbook {
    workbook: Xlsx<BufReader<File>>,
}

impl ExcelWorkbook {
    pub fn open<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let workbook: Xlsx<_> = open_workbook(path.as_ref())?;
        Ok(Self { workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.workbook.sheet_names().iter().any(|name| name == sheet)
    }

    /// Load one sheet as a `Grid`. A sheet that cannot be read is a
    /// structural failure for the recipe that needs it.
    pub fn grid(&mut self, sheet: &str) -> ExtractResult<Grid> {
        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|_| ExtractError::SheetMissing(sheet.to_string()))?;
        Ok(range_to_grid(&range))
    }
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    // Absolute coordinates: a sheet whose data starts below A1 must still
    // address row 0 as row 0.
    let end = match range.end() {
        Some(end) => end,
        None => return Grid::from_rows(Vec::new()),
    };
    let height = end.0 as usize + 1;
    let width = end.1 as usize + 1;
    let mut rows = Vec::with_capacity(height);
    for row in 0..height {
        let mut cells = Vec::with_capacity(width);
        for col in 0..width {
            let cell = match range.get_value((row as u32, col as u32)) {
                Some(data) => data_to_cell(data),
                None => CellValue::Empty,
            };
            cells.push(cell);
        }
        rows.push(cells);
    }
    Grid::from_rows(rows)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => CellValue::Date(date),
            Err(_) => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
