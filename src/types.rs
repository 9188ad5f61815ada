use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single spreadsheet cell, decoupled from the reader's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Cast to display text. Numbers drop trailing zeros so that a version
    /// cell holding 2.0 joins against the literal "2".
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Numeric view: a number cell, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Format a number for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display (sufficient for financial values)
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//==============================================================================
// Per-Workbook Records
//==============================================================================

/// Identity anchors read from fixed cells of the FMV sheet.
#[derive(Debug, Clone)]
pub struct WorkbookIdentity {
    pub file_name: String,
    pub property_id: CellValue,
    pub version: CellValue,
}

/// One workbook's key metrics: resolved field name → cell value.
/// Fields that cleared no label match are simply absent from the map.
#[derive(Debug, Clone)]
pub struct KeyMetricsRecord {
    pub identity: WorkbookIdentity,
    pub scenario: String,
    pub values: HashMap<&'static str, CellValue>,
}

impl KeyMetricsRecord {
    pub fn value(&self, name: &str) -> Option<&CellValue> {
        self.values.get(name)
    }
}

/// One row of the consolidated cash-flow series.
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowRecord {
    #[serde(rename = "Property_ID")]
    pub property_id: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "NetCashFlowAmount")]
    pub net_cash_flow: f64,
}

/// One workbook's general assumptions, gathered from up to three sheets.
#[derive(Debug, Clone)]
pub struct AssumptionsRecord {
    pub identity: WorkbookIdentity,
    pub scenario: String,
    pub values: HashMap<&'static str, CellValue>,
}

impl AssumptionsRecord {
    pub fn value(&self, name: &str) -> Option<&CellValue> {
        self.values.get(name)
    }
}

//==============================================================================
// Workbook Outcomes
//==============================================================================

/// Stand-in row for a workbook whose recipe failed structurally.
#[derive(Debug, Clone)]
pub struct ErrorPlaceholder {
    pub file_name: String,
    pub message: String,
}

/// Per-workbook result: the extracted record, or a placeholder carrying the
/// failure message. Failure is a value here, not control flow.
#[derive(Debug, Clone)]
pub enum WorkbookOutcome<T> {
    Extracted(T),
    Failed(ErrorPlaceholder),
}

impl<T> WorkbookOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, WorkbookOutcome::Failed(_))
    }

    pub fn as_extracted(&self) -> Option<&T> {
        match self {
            WorkbookOutcome::Extracted(record) => Some(record),
            WorkbookOutcome::Failed(_) => None,
        }
    }
}

//==============================================================================
// Batch Output
//==============================================================================

/// The three consolidated tables plus the missing-field diagnostic log.
/// Record order follows workbook upload order throughout.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub key_metrics: Vec<WorkbookOutcome<KeyMetricsRecord>>,
    pub cash_flows: Vec<CashFlowRecord>,
    pub assumptions: Vec<WorkbookOutcome<AssumptionsRecord>>,
    pub diagnostics: Vec<String>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbooks whose key-metrics recipe failed structurally.
    pub fn failed_count(&self) -> usize {
        self.key_metrics.iter().filter(|o| o.is_failed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims_trailing_zeros() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(5.3), "5.3");
        assert_eq!(format_number(1000000.0), "1000000");
        assert_eq!(format_number(0.070000), "0.07");
    }

    #[test]
    fn test_cell_text_casts() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::Number(2.0).to_text(), "2");
        assert_eq!(CellValue::Text("  Tower A ".to_string()).to_text(), "  Tower A ");
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(CellValue::Date(date).to_text(), "2025-03-31");
    }

    #[test]
    fn test_as_number_accepts_numeric_text() {
        assert_eq!(CellValue::Number(5.3).as_number(), Some(5.3));
        assert_eq!(CellValue::Text(" 42.5 ".to_string()).as_number(), Some(42.5));
        assert_eq!(CellValue::Text("n/a".to_string()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }
}
