//! Normalized lookup surface over one sheet's cell array.

use crate::types::CellValue;
use chrono::{Duration, NaiveDate};

static EMPTY: CellValue = CellValue::Empty;

/// Immutable row-major grid of one worksheet. Indices are zero-based and
/// stable for the lifetime of one workbook's processing pass. Out-of-bounds
/// reads yield `Empty` because sheet ranges are ragged.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Raw text cast of a cell (blank → empty string).
    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).to_text()
    }

    /// Normalized text of a cell: cast, trim, lowercase.
    pub fn normalized(&self, row: usize, col: usize) -> String {
        normalize(&self.text(row, col))
    }

    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).as_number()
    }

    /// Date view of a cell: a native date, an Excel serial, or date-formatted
    /// text. Anything else is `None`.
    pub fn date(&self, row: usize, col: usize) -> Option<NaiveDate> {
        match self.cell(row, col) {
            CellValue::Date(d) => Some(*d),
            CellValue::Number(n) => excel_serial_to_date(*n),
            CellValue::Text(s) => parse_text_date(s),
            _ => None,
        }
    }

    /// Normalized labels down one column, row order preserved.
    pub fn column(&self, col: usize) -> Vec<String> {
        (0..self.height()).map(|row| self.normalized(row, col)).collect()
    }

    /// Normalized labels across one row, column order preserved.
    pub fn row(&self, row: usize) -> Vec<String> {
        (0..self.width()).map(|col| self.normalized(row, col)).collect()
    }

    /// First row whose normalized text in `col` equals the pre-normalized
    /// needle. Used for the non-fuzzy lookups (version join, literal labels).
    pub fn find_exact_row(&self, col: usize, needle: &str) -> Option<usize> {
        (0..self.height()).find(|&row| self.normalized(row, col) == needle)
    }
}

/// Uniform normalization applied before any comparison, fuzzy or exact:
/// blank → empty string, cast to text, trim, lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Excel epoch: 1899-12-30 (adjusted for Excel's 1900 leap-year bug)
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial as i64))
}

fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue::{Date, Empty, Number, Text};

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![Text("Alpha".to_string()), Number(1.0)],
            vec![Text("  BETA  ".to_string())],
            vec![Empty, Text("2".to_string()), Number(45566.0)],
        ])
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let grid = sample();
        assert_eq!(*grid.cell(99, 0), Empty);
        assert_eq!(*grid.cell(1, 1), Empty); // ragged row
        assert_eq!(grid.text(99, 99), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let grid = sample();
        let once = grid.normalized(1, 0);
        assert_eq!(once, "beta");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_find_exact_row_case_insensitive() {
        let grid = sample();
        assert_eq!(grid.find_exact_row(0, "beta"), Some(1));
        assert_eq!(grid.find_exact_row(0, "alpha"), Some(0));
        assert_eq!(grid.find_exact_row(0, "gamma"), None);
    }

    #[test]
    fn test_excel_serial_to_date() {
        // 45566 = October 1, 2024
        let date = excel_serial_to_date(45566.0).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(excel_serial_to_date(0.0), None);
    }

    #[test]
    fn test_date_views() {
        let grid = sample();
        assert_eq!(
            grid.date(2, 2),
            Some(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
        );

        let textual = Grid::from_rows(vec![vec![
            Text("2025-03-31".to_string()),
            Text("03/31/2025".to_string()),
            Text("not a date".to_string()),
            Date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
        ]]);
        let expected = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(textual.date(0, 0), Some(expected));
        assert_eq!(textual.date(0, 1), Some(expected));
        assert_eq!(textual.date(0, 2), None);
        assert_eq!(textual.date(0, 3), Some(expected));
    }

    #[test]
    fn test_column_and_row_labels() {
        let grid = sample();
        assert_eq!(grid.column(0), vec!["alpha", "beta", ""]);
        assert_eq!(grid.row(0), vec!["alpha", "1", ""]);
    }
}
