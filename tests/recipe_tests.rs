//! Recipe tests over in-memory grids: key metrics, cash flow, assumptions.

use chrono::NaiveDate;
use fmv_extract::core::grid::Grid;
use fmv_extract::core::{assumptions, cash_flow, key_metrics};
use fmv_extract::types::CellValue;
use pretty_assertions::assert_eq;

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

fn date(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Sparse grid builder for fixtures.
struct GridBuilder {
    cells: Vec<(usize, usize, CellValue)>,
}

impl GridBuilder {
    fn new() -> Self {
        Self { cells: Vec::new() }
    }

    fn set(&mut self, row: usize, col: usize, value: CellValue) -> &mut Self {
        self.cells.push((row, col, value));
        self
    }

    fn build(&self) -> Grid {
        let height = self.cells.iter().map(|(r, _, _)| r + 1).max().unwrap_or(0);
        let width = self.cells.iter().map(|(_, c, _)| c + 1).max().unwrap_or(0);
        let mut rows = vec![vec![CellValue::Empty; width]; height];
        for (row, col, value) in &self.cells {
            rows[*row][*col] = value.clone();
        }
        Grid::from_rows(rows)
    }
}

/// FMV sheet fixture: identity anchors, a handful of labeled metrics, the
/// version-joined valuation block, and a cash-flow block with bad rows.
fn fmv_grid() -> Grid {
    let mut b = GridBuilder::new();
    b.set(2, 0, text("P-001"))
        .set(3, 0, num(2.0))
        // key-metric labels (col E) and values (col H)
        .set(10, 4, text("WALE (Years)"))
        .set(10, 7, num(5.3))
        .set(11, 4, text("InPlaceRent"))
        .set(11, 7, num(23.75))
        .set(12, 4, text("Exit Cap Rate"))
        .set(12, 7, num(0.065))
        .set(13, 4, text("10Y Unlevered DCF"))
        .set(13, 7, num(9750000.0))
        .set(14, 4, text("Total Profit"))
        .set(14, 7, num(4200000.0))
        // valuation block: column J joins against the version
        .set(19, 9, text("1"))
        .set(19, 10, num(900000.0))
        .set(19, 11, num(950000.0))
        .set(20, 9, text("2"))
        .set(20, 10, num(1000000.0))
        .set(20, 11, num(1200000.0))
        .set(21, 9, text("2"))
        .set(21, 10, num(888.0))
        .set(21, 11, num(999.0))
        // cash-flow block: dates col N, amounts col O
        .set(6, 13, date(2025, 3, 31))
        .set(6, 14, num(-125000.5))
        .set(7, 13, date(2025, 6, 30))
        .set(7, 14, num(98000.0))
        .set(8, 13, text("not a date"))
        .set(8, 14, num(1.0))
        .set(9, 13, date(2025, 12, 31))
        // row 9 amount missing: dropped
        .set(10, 13, text("2026-03-31"))
        .set(10, 14, text("77500"));
    b.build()
}

#[test]
fn test_identity_reads_fixed_cells() {
    let grid = fmv_grid();
    let identity = key_metrics::read_identity(&grid, "tower_a.xlsx");
    assert_eq!(identity.property_id, text("P-001"));
    assert_eq!(identity.version, num(2.0));
    assert_eq!(identity.file_name, "tower_a.xlsx");
}

#[test]
fn test_key_metrics_fuzzy_fields() {
    let grid = fmv_grid();
    let identity = key_metrics::read_identity(&grid, "tower_a.xlsx");
    let (record, _) = key_metrics::extract_key_metrics(&grid, &identity, "Base");

    // aliased label: "WALE (Years)" at (10,4), value at (10,7)
    assert_eq!(record.value("WALE"), Some(&num(5.3)));
    assert_eq!(record.value("InPlaceRent"), Some(&num(23.75)));
    // label drifted to spaced form, still resolves
    assert_eq!(record.value("ExitCapRate"), Some(&num(0.065)));
    assert_eq!(record.value("TotalProfit"), Some(&num(4200000.0)));
    assert_eq!(record.scenario, "Base");
}

#[test]
fn test_key_metrics_exact_lookups() {
    let grid = fmv_grid();
    let identity = key_metrics::read_identity(&grid, "tower_a.xlsx");
    let (record, _) = key_metrics::extract_key_metrics(&grid, &identity, "Base");

    assert_eq!(record.value("10Y Unlevered DCF"), Some(&num(9750000.0)));
    // version "2" joins row 20, not the later duplicate at row 21
    assert_eq!(record.value("GAV"), Some(&num(1000000.0)));
    assert_eq!(record.value("FMV"), Some(&num(1200000.0)));
}

#[test]
fn test_key_metrics_missing_fields_are_absent_and_logged() {
    let grid = fmv_grid();
    let identity = key_metrics::read_identity(&grid, "tower_a.xlsx");
    let (record, diagnostics) = key_metrics::extract_key_metrics(&grid, &identity, "Base");

    assert_eq!(record.value("LIRR"), None);
    assert_eq!(record.value("Holdbacks"), None);
    assert!(diagnostics.contains(&"missing field LIRR in file tower_a.xlsx".to_string()));
    assert!(diagnostics.contains(&"missing field Holdbacks in file tower_a.xlsx".to_string()));
}

#[test]
fn test_key_metrics_unjoinable_version() {
    let mut b = GridBuilder::new();
    b.set(2, 0, text("P-002")).set(3, 0, text("7"));
    let grid = b.build();
    let identity = key_metrics::read_identity(&grid, "lone.xlsx");
    let (record, diagnostics) = key_metrics::extract_key_metrics(&grid, &identity, "Base");

    assert_eq!(record.value("GAV"), None);
    assert_eq!(record.value("FMV"), None);
    assert!(diagnostics.contains(&"missing field GAV in file lone.xlsx".to_string()));
}

#[test]
fn test_cash_flow_drops_malformed_rows_in_order() {
    let grid = fmv_grid();
    let identity = key_metrics::read_identity(&grid, "tower_a.xlsx");
    let records = cash_flow::extract_cash_flows(&grid, &identity, "Base");

    assert_eq!(records.len(), 3);
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        ]
    );
    let amounts: Vec<f64> = records.iter().map(|r| r.net_cash_flow).collect();
    assert_eq!(amounts, vec![-125000.5, 98000.0, 77500.0]);
    for record in &records {
        assert_eq!(record.property_id, "P-001");
        assert_eq!(record.version, "2");
        assert_eq!(record.scenario, "Base");
    }
}

#[test]
fn test_cash_flow_empty_block() {
    let mut b = GridBuilder::new();
    b.set(2, 0, text("P-003")).set(3, 0, num(1.0));
    let grid = b.build();
    let identity = key_metrics::read_identity(&grid, "empty.xlsx");
    assert!(cash_flow::extract_cash_flows(&grid, &identity, "Base").is_empty());
}

fn dcf_grid() -> Grid {
    let mut b = GridBuilder::new();
    b.set(0, 0, text("As Of"))
        .set(1, 0, date(2025, 6, 30))
        .set(3, 1, text("Discount Rate"))
        .set(3, 3, num(0.075))
        .set(4, 1, text("Terminal Cap Rate"))
        .set(4, 3, num(0.0625))
        .set(5, 1, text("Market Rent Growth"))
        .set(5, 3, num(0.03));
    b.build()
}

fn inputs_grid() -> Grid {
    let mut b = GridBuilder::new();
    b.set(2, 0, text("Interest Rate Caps"))
        .set(2, 2, text("3.5% strike"))
        .set(3, 0, text("Loan Maturity"))
        .set(3, 2, date(2027, 9, 1))
        .set(5, 0, text("Fund"))
        .set(5, 1, text("Fund IV"));
    b.build()
}

#[test]
fn test_assumptions_across_sheets() {
    let mut b = GridBuilder::new();
    b.set(2, 0, text("P-001"))
        .set(3, 0, num(2.0))
        .set(5, 4, text("Valuation Date"))
        .set(5, 7, date(2025, 3, 31));
    let fmv = b.build();
    let identity = key_metrics::read_identity(&fmv, "tower_a.xlsx");

    let (record, diagnostics) =
        assumptions::extract_assumptions(&fmv, &dcf_grid(), &inputs_grid(), &identity, "Base");

    assert_eq!(record.value("Valuation_Date"), Some(&date(2025, 3, 31)));
    assert_eq!(record.value("Discount_Rate"), Some(&num(0.075)));
    assert_eq!(record.value("Terminal_Cap_Rate"), Some(&num(0.0625)));
    assert_eq!(record.value("Market_Rent_Growth"), Some(&num(0.03)));
    // column-axis field: label in row 0, value one row below
    assert_eq!(record.value("As_Of_Date"), Some(&date(2025, 6, 30)));
    // Inputs-sheet group
    assert_eq!(
        record.value("Interest_Rate_Caps_Input"),
        Some(&text("3.5% strike"))
    );
    assert_eq!(record.value("Loan_Maturity_Input"), Some(&date(2027, 9, 1)));
    // exact fund row
    assert_eq!(record.value("Fund"), Some(&text("Fund IV")));

    // fields with no label anywhere are absent and logged
    assert_eq!(record.value("General_Vacancy"), None);
    assert!(diagnostics
        .contains(&"missing field General_Vacancy in file tower_a.xlsx".to_string()));
    assert_eq!(record.value("Year_Built"), None);
}

#[test]
fn test_assumptions_missing_fund_row() {
    let fmv = GridBuilder::new().set(2, 0, text("P-004")).build();
    let inputs = GridBuilder::new().set(0, 0, text("Leverage")).build();
    let identity = key_metrics::read_identity(&fmv, "no_fund.xlsx");

    let (record, diagnostics) =
        assumptions::extract_assumptions(&fmv, &dcf_grid(), &inputs, &identity, "Base");

    assert_eq!(record.value("Fund"), None);
    assert!(diagnostics.contains(&"missing field Fund in file no_fund.xlsx".to_string()));
}
