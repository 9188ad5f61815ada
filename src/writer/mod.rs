//! CSV rendering of the three batch tables.
//!
//! Header order is fixed by the static field tables; placeholder rows carry
//! only FileName and Error, with every metric cell left blank.

use crate::core::fields::{
    ASSUMPTION_FIELDS, FMV_FIELD, FUND_FIELD, GAV_FIELD, KEY_METRICS_FIELDS, UNLEVERED_DCF_FIELD,
};
use crate::error::ExtractResult;
use crate::types::{
    AssumptionsRecord, BatchResult, CashFlowRecord, CellValue, ErrorPlaceholder, KeyMetricsRecord,
    WorkbookOutcome,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const KEY_METRICS_FILE: &str = "fmv_extracted_metrics.csv";
pub const CASH_FLOW_FILE: &str = "cash_flow_records.csv";
pub const ASSUMPTIONS_FILE: &str = "general_assumptions.csv";

const IDENTITY_COLUMNS: [&str; 4] = ["FileName", "Property_ID", "Version", "Scenario"];
const ERROR_COLUMN: &str = "Error";

/// Key-metric value columns in output order.
fn key_metric_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = KEY_METRICS_FIELDS.iter().map(|f| f.name).collect();
    columns.push(UNLEVERED_DCF_FIELD);
    columns.push(GAV_FIELD);
    columns.push(FMV_FIELD);
    columns
}

/// Assumption value columns in output order.
fn assumption_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> =
        ASSUMPTION_FIELDS.iter().map(|spec| spec.field.name).collect();
    columns.push(FUND_FIELD);
    columns
}

/// Write the key-metrics table.
pub fn write_key_metrics<W: Write>(
    out: W,
    records: &[WorkbookOutcome<KeyMetricsRecord>],
) -> ExtractResult<()> {
    let columns = key_metric_columns();
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(&columns))?;
    for outcome in records {
        match outcome {
            WorkbookOutcome::Extracted(record) => {
                let identity = [
                    record.identity.file_name.clone(),
                    record.identity.property_id.to_text(),
                    record.identity.version.to_text(),
                    record.scenario.clone(),
                ];
                writer.write_record(value_row(&identity, &columns, &record.values))?;
            }
            WorkbookOutcome::Failed(placeholder) => {
                writer.write_record(placeholder_row(placeholder, columns.len()))?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write the consolidated cash-flow table.
pub fn write_cash_flows<W: Write>(out: W, records: &[CashFlowRecord]) -> ExtractResult<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    // Explicit header so an empty batch still yields a well-formed file.
    writer.write_record([
        "Property_ID",
        "Version",
        "Scenario",
        "Date",
        "NetCashFlowAmount",
    ])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the general-assumptions table.
pub fn write_assumptions<W: Write>(
    out: W,
    records: &[WorkbookOutcome<AssumptionsRecord>],
) -> ExtractResult<()> {
    let columns = assumption_columns();
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(&columns))?;
    for outcome in records {
        match outcome {
            WorkbookOutcome::Extracted(record) => {
                let identity = [
                    record.identity.file_name.clone(),
                    record.identity.property_id.to_text(),
                    record.identity.version.to_text(),
                    record.scenario.clone(),
                ];
                writer.write_record(value_row(&identity, &columns, &record.values))?;
            }
            WorkbookOutcome::Failed(placeholder) => {
                writer.write_record(placeholder_row(placeholder, columns.len()))?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write all three tables into `dir`, returning the paths written.
pub fn export_batch(dir: &Path, result: &BatchResult) -> ExtractResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let key_metrics_path = dir.join(KEY_METRICS_FILE);
    let cash_flow_path = dir.join(CASH_FLOW_FILE);
    let assumptions_path = dir.join(ASSUMPTIONS_FILE);

    write_key_metrics(File::create(&key_metrics_path)?, &result.key_metrics)?;
    write_cash_flows(File::create(&cash_flow_path)?, &result.cash_flows)?;
    write_assumptions(File::create(&assumptions_path)?, &result.assumptions)?;

    Ok(vec![key_metrics_path, cash_flow_path, assumptions_path])
}

fn header(columns: &[&'static str]) -> Vec<String> {
    let mut row: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    row.extend(columns.iter().map(|c| c.to_string()));
    row.push(ERROR_COLUMN.to_string());
    row
}

fn value_row(
    identity: &[String; 4],
    columns: &[&'static str],
    values: &HashMap<&'static str, CellValue>,
) -> Vec<String> {
    let mut row: Vec<String> = identity.to_vec();
    for column in columns {
        row.push(values.get(column).map(CellValue::to_text).unwrap_or_default());
    }
    row.push(String::new());
    row
}

fn placeholder_row(placeholder: &ErrorPlaceholder, value_columns: usize) -> Vec<String> {
    let mut row = vec![placeholder.file_name.clone()];
    // blank Property_ID, Version, Scenario and every value column
    row.extend(std::iter::repeat(String::new()).take(3 + value_columns));
    row.push(placeholder.message.clone());
    row
}
