//! fmv-extract - batch extraction of portfolio metrics from valuation
//! workbooks.
//!
//! This library locates named values inside loosely-structured spreadsheet
//! grids by fuzzy label matching, runs three extraction recipes per workbook
//! (key metrics, cash-flow series, general assumptions), and consolidates a
//! batch of workbooks into three CSV tables.
//!
//! # Features
//!
//! - Fuzzy label resolver with a similarity cutoff and deterministic
//!   tie-breaking
//! - Fixed-coordinate anchors (Property_ID, Version) plus exact-match
//!   lookups for version-joined valuation rows
//! - Per-workbook failure isolation: one broken file never aborts a batch
//!
//! # Example
//!
//! ```no_run
//! use fmv_extract::core::process_batch;
//! use fmv_extract::writer;
//! use std::path::{Path, PathBuf};
//!
//! let files = vec![PathBuf::from("tower_a.xlsx"), PathBuf::from("tower_b.xlsx")];
//! let result = process_batch(&files, "Base Case", |done, total| {
//!     eprintln!("{done}/{total}");
//! });
//! writer::export_batch(Path::new("out"), &result)?;
//! # Ok::<(), fmv_extract::ExtractError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ExtractError, ExtractResult};
pub use types::{
    AssumptionsRecord, BatchResult, CashFlowRecord, CellValue, ErrorPlaceholder, KeyMetricsRecord,
    WorkbookIdentity, WorkbookOutcome,
};
