//! Cash-flow recipe: fixed-position date/amount columns of the FMV sheet,
//! zipped positionally into tagged records.

use crate::core::fields::{CASH_FLOW_AMOUNT_COL, CASH_FLOW_DATE_COL, CASH_FLOW_START_ROW};
use crate::core::grid::Grid;
use crate::types::{CashFlowRecord, WorkbookIdentity};

/// Extract the cash-flow series. Rows whose date fails to parse or whose
/// amount is not numeric are dropped without diagnostics; surviving rows
/// keep their original sheet order.
pub fn extract_cash_flows(
    grid: &Grid,
    identity: &WorkbookIdentity,
    scenario: &str,
) -> Vec<CashFlowRecord> {
    let mut records = Vec::new();
    for row in CASH_FLOW_START_ROW..grid.height() {
        let date = match grid.date(row, CASH_FLOW_DATE_COL) {
            Some(date) => date,
            None => continue,
        };
        let amount = match grid.number(row, CASH_FLOW_AMOUNT_COL) {
            Some(amount) => amount,
            None => continue,
        };
        records.push(CashFlowRecord {
            property_id: identity.property_id.to_text(),
            version: identity.version.to_text(),
            scenario: scenario.to_string(),
            date,
            net_cash_flow: amount,
        });
    }
    records
}
