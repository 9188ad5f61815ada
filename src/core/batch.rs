//! Batch aggregation: run the recipes over many workbooks, isolating
//! per-workbook failures and reporting incremental progress.

use crate::core::fields::SheetKind;
use crate::core::{assumptions, cash_flow, key_metrics};
use crate::excel::ExcelWorkbook;
use crate::types::{BatchResult, ErrorPlaceholder, WorkbookOutcome};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Process workbooks strictly sequentially, in input order. Never fails:
/// a workbook that cannot be read contributes one error placeholder to the
/// key-metrics table and the batch moves on. `progress(completed, total)`
/// fires after every workbook.
pub fn process_batch<F>(paths: &[PathBuf], scenario: &str, mut progress: F) -> BatchResult
where
    F: FnMut(usize, usize),
{
    let total = paths.len();
    let mut result = BatchResult::new();
    for (index, path) in paths.iter().enumerate() {
        process_workbook(path, scenario, &mut result);
        progress(index + 1, total);
    }
    result
}

fn process_workbook(path: &Path, scenario: &str, result: &mut BatchResult) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!(file = %file_name, "processing workbook");

    // The FMV sheet anchors everything; without it the workbook yields only
    // an error placeholder in the key-metrics table.
    let mut workbook = match ExcelWorkbook::open(path) {
        Ok(workbook) => workbook,
        Err(error) => {
            warn!(file = %file_name, %error, "workbook unreadable");
            result
                .key_metrics
                .push(WorkbookOutcome::Failed(ErrorPlaceholder {
                    file_name,
                    message: error.to_string(),
                }));
            return;
        }
    };
    let fmv = match workbook.grid(SheetKind::Fmv.sheet_name()) {
        Ok(grid) => grid,
        Err(error) => {
            warn!(file = %file_name, %error, "FMV sheet missing");
            result
                .key_metrics
                .push(WorkbookOutcome::Failed(ErrorPlaceholder {
                    file_name,
                    message: error.to_string(),
                }));
            return;
        }
    };

    let identity = key_metrics::read_identity(&fmv, &file_name);

    let (metrics, mut diagnostics) = key_metrics::extract_key_metrics(&fmv, &identity, scenario);
    result.diagnostics.append(&mut diagnostics);
    result.key_metrics.push(WorkbookOutcome::Extracted(metrics));

    result
        .cash_flows
        .extend(cash_flow::extract_cash_flows(&fmv, &identity, scenario));

    // The assumptions recipe needs both auxiliary sheets; failure here is
    // isolated to the assumptions table.
    let auxiliary = match workbook.grid(SheetKind::DcfModel.sheet_name()) {
        Ok(dcf) => workbook
            .grid(SheetKind::Inputs.sheet_name())
            .map(|inputs| (dcf, inputs)),
        Err(error) => Err(error),
    };
    match auxiliary {
        Ok((dcf_model, inputs)) => {
            let (record, mut diagnostics) =
                assumptions::extract_assumptions(&fmv, &dcf_model, &inputs, &identity, scenario);
            result.diagnostics.append(&mut diagnostics);
            result.assumptions.push(WorkbookOutcome::Extracted(record));
        }
        Err(error) => {
            warn!(file = %file_name, %error, "assumptions sheets missing");
            result
                .assumptions
                .push(WorkbookOutcome::Failed(ErrorPlaceholder {
                    file_name,
                    message: error.to_string(),
                }));
        }
    }
}
