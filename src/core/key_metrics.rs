//! Key-metrics recipe over the FMV sheet.
//!
//! Fuzzy-resolves the fixed field list against the label column, then reads
//! the 10Y Unlevered DCF row and the version-joined GAV/FMV block by exact
//! match.

use crate::core::fields::{
    FMV_COL, FMV_FIELD, FUZZY_CUTOFF, GAV_COL, GAV_FIELD, KEY_METRICS_FIELDS,
    KEY_METRIC_LABEL_COL, KEY_METRIC_VALUE_COL, PROPERTY_ID_CELL, UNLEVERED_DCF_FIELD,
    UNLEVERED_DCF_SEARCH, VERSION_CELL, VERSION_JOIN_COL,
};
use crate::core::grid::{normalize, Grid};
use crate::core::resolver::LabelIndex;
use crate::types::{KeyMetricsRecord, WorkbookIdentity};
use std::collections::HashMap;
use tracing::warn;

/// Read the identity anchors from their fixed cells.
pub fn read_identity(grid: &Grid, file_name: &str) -> WorkbookIdentity {
    WorkbookIdentity {
        file_name: file_name.to_string(),
        property_id: grid.cell(PROPERTY_ID_CELL.0, PROPERTY_ID_CELL.1).clone(),
        version: grid.cell(VERSION_CELL.0, VERSION_CELL.1).clone(),
    }
}

/// Extract one workbook's key metrics. Fields that resolve to no label are
/// absent from the record and reported in the returned diagnostic lines.
pub fn extract_key_metrics(
    grid: &Grid,
    identity: &WorkbookIdentity,
    scenario: &str,
) -> (KeyMetricsRecord, Vec<String>) {
    let mut values = HashMap::new();
    let mut diagnostics = Vec::new();
    let labels = LabelIndex::from_column(grid, KEY_METRIC_LABEL_COL);

    for spec in KEY_METRICS_FIELDS {
        match labels.resolve(spec.search, FUZZY_CUTOFF) {
            Some(row) => {
                values.insert(spec.name, grid.cell(row, KEY_METRIC_VALUE_COL).clone());
            }
            None => report_missing(&mut diagnostics, spec.name, identity),
        }
    }

    match grid.find_exact_row(KEY_METRIC_LABEL_COL, UNLEVERED_DCF_SEARCH) {
        Some(row) => {
            values.insert(UNLEVERED_DCF_FIELD, grid.cell(row, KEY_METRIC_VALUE_COL).clone());
        }
        None => report_missing(&mut diagnostics, UNLEVERED_DCF_FIELD, identity),
    }

    // GAV and FMV sit on the row whose version column equals this workbook's
    // version; first match wins.
    let version_key = normalize(&identity.version.to_text());
    let joined_row = if version_key.is_empty() {
        None
    } else {
        grid.find_exact_row(VERSION_JOIN_COL, &version_key)
    };
    match joined_row {
        Some(row) => {
            values.insert(GAV_FIELD, grid.cell(row, GAV_COL).clone());
            values.insert(FMV_FIELD, grid.cell(row, FMV_COL).clone());
        }
        None => {
            report_missing(&mut diagnostics, GAV_FIELD, identity);
            report_missing(&mut diagnostics, FMV_FIELD, identity);
        }
    }

    let record = KeyMetricsRecord {
        identity: identity.clone(),
        scenario: scenario.to_string(),
        values,
    };
    (record, diagnostics)
}

pub(crate) fn report_missing(
    diagnostics: &mut Vec<String>,
    field: &str,
    identity: &WorkbookIdentity,
) {
    warn!(field, file = %identity.file_name, "field not found");
    diagnostics.push(format!(
        "missing field {} in file {}",
        field, identity.file_name
    ));
}
