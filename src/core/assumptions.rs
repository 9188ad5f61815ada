//! General-assumptions recipe across the FMV, DCF Model and Inputs sheets.

use crate::core::fields::{
    Axis, SheetKind, ASSUMPTION_FIELDS, FUND_FIELD, FUND_LABEL_COL, FUND_SEARCH, FUND_VALUE_COL,
    FUZZY_CUTOFF,
};
use crate::core::grid::Grid;
use crate::core::key_metrics::report_missing;
use crate::core::resolver::LabelIndex;
use crate::types::{AssumptionsRecord, WorkbookIdentity};
use std::collections::HashMap;

/// Extract one workbook's general assumptions. Each field names its own
/// sheet, label axis and value offset; label indices are built once per
/// (sheet, axis, index) and shared across fields.
pub fn extract_assumptions(
    fmv: &Grid,
    dcf_model: &Grid,
    inputs: &Grid,
    identity: &WorkbookIdentity,
    scenario: &str,
) -> (AssumptionsRecord, Vec<String>) {
    let mut values = HashMap::new();
    let mut diagnostics = Vec::new();
    let mut indexes: HashMap<(SheetKind, Axis, usize), LabelIndex> = HashMap::new();

    for spec in ASSUMPTION_FIELDS {
        let grid = match spec.sheet {
            SheetKind::Fmv => fmv,
            SheetKind::DcfModel => dcf_model,
            SheetKind::Inputs => inputs,
        };
        let index = indexes
            .entry((spec.sheet, spec.axis, spec.label_index))
            .or_insert_with(|| LabelIndex::from_axis(grid, spec.axis, spec.label_index));

        match index.resolve(spec.field.search, FUZZY_CUTOFF) {
            Some(position) => {
                let value = match spec.axis {
                    Axis::Rows => grid.cell(position, spec.label_index + spec.value_offset),
                    Axis::Columns => grid.cell(spec.label_index + spec.value_offset, position),
                };
                values.insert(spec.field.name, value.clone());
            }
            None => report_missing(&mut diagnostics, spec.field.name, identity),
        }
    }

    // The fund row is a literal, not a fuzzy label.
    match inputs.find_exact_row(FUND_LABEL_COL, FUND_SEARCH) {
        Some(row) => {
            values.insert(FUND_FIELD, inputs.cell(row, FUND_VALUE_COL).clone());
        }
        None => report_missing(&mut diagnostics, FUND_FIELD, identity),
    }

    let record = AssumptionsRecord {
        identity: identity.clone(),
        scenario: scenario.to_string(),
        values,
    };
    (record, diagnostics)
}
