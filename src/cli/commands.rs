use crate::core::fields::SheetKind;
use crate::core::{batch, fields};
use crate::error::{ExtractError, ExtractResult};
use crate::excel::ExcelWorkbook;
use crate::types::{CellValue, WorkbookOutcome};
use crate::writer;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;

/// Execute the extract command: run the batch and write the three tables.
pub fn extract(
    files: Vec<PathBuf>,
    scenario: String,
    out_dir: PathBuf,
    verbose: bool,
) -> ExtractResult<()> {
    println!("{}", "📊 Extracting portfolio metrics".bold().green());
    println!("   Scenario: {}", scenario.bright_yellow().bold());
    println!("   Workbooks: {}", files.len());
    println!();

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let result = batch::process_batch(&files, &scenario, |completed, _total| {
        bar.set_position(completed as u64);
    });
    bar.finish_and_clear();

    let extracted = result.key_metrics.len() - result.failed_count();
    println!("{}", "✅ Extraction complete".bold().green());
    println!("   Key-metric records:  {}", result.key_metrics.len());
    println!("   Cash-flow records:   {}", result.cash_flows.len());
    println!("   Assumption records:  {}", result.assumptions.len());
    if result.failed_count() > 0 {
        println!(
            "   {}",
            format!(
                "{} of {} workbooks failed and produced placeholder rows",
                result.failed_count(),
                result.key_metrics.len()
            )
            .yellow()
        );
        for outcome in &result.key_metrics {
            if let WorkbookOutcome::Failed(placeholder) = outcome {
                println!(
                    "      {} {}: {}",
                    "❌".red(),
                    placeholder.file_name,
                    placeholder.message.red()
                );
            }
        }
    } else {
        println!("   All {extracted} workbooks extracted cleanly");
    }

    if !result.diagnostics.is_empty() {
        println!(
            "   {}",
            format!("{} missing-field diagnostics", result.diagnostics.len()).yellow()
        );
        if verbose {
            for line in &result.diagnostics {
                println!("      ⚠️  {line}");
            }
        }
    }
    println!();

    let written = writer::export_batch(&out_dir, &result)?;
    println!("{}", "💾 Tables written:".bold().cyan());
    for path in written {
        println!("   {}", path.display());
    }

    Ok(())
}

/// Execute the inspect command: extract one workbook and print every field.
pub fn inspect(file: PathBuf, scenario: String) -> ExtractResult<()> {
    println!("{}", "🔍 Inspecting workbook".bold().green());
    println!("   File: {}\n", file.display());

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let mut workbook = ExcelWorkbook::open(&file)?;
    let fmv = workbook.grid(SheetKind::Fmv.sheet_name())?;
    let identity = crate::core::key_metrics::read_identity(&fmv, &file_name);

    println!("{}", "📋 Identity:".bold().cyan());
    println!("   Property_ID: {}", identity.property_id.to_text().bold());
    println!("   Version:     {}", identity.version.to_text().bold());
    println!();

    let (metrics, _) = crate::core::key_metrics::extract_key_metrics(&fmv, &identity, &scenario);
    println!("{}", "📐 Key metrics:".bold().cyan());
    let mut columns: Vec<&'static str> =
        fields::KEY_METRICS_FIELDS.iter().map(|f| f.name).collect();
    columns.extend([fields::UNLEVERED_DCF_FIELD, fields::GAV_FIELD, fields::FMV_FIELD]);
    print_fields(&columns, &metrics.values);

    let cash_flows = crate::core::cash_flow::extract_cash_flows(&fmv, &identity, &scenario);
    println!("\n{}", "💰 Cash flow:".bold().cyan());
    println!("   {} rows", cash_flows.len());
    if let (Some(first), Some(last)) = (cash_flows.first(), cash_flows.last()) {
        println!("   {} .. {}", first.date, last.date);
    }

    let dcf_model = workbook.grid(SheetKind::DcfModel.sheet_name());
    let inputs = workbook.grid(SheetKind::Inputs.sheet_name());
    match (dcf_model, inputs) {
        (Ok(dcf_model), Ok(inputs)) => {
            let (record, _) = crate::core::assumptions::extract_assumptions(
                &fmv, &dcf_model, &inputs, &identity, &scenario,
            );
            println!("\n{}", "🧾 General assumptions:".bold().cyan());
            let mut columns: Vec<&'static str> = fields::ASSUMPTION_FIELDS
                .iter()
                .map(|spec| spec.field.name)
                .collect();
            columns.push(fields::FUND_FIELD);
            print_fields(&columns, &record.values);
        }
        (dcf_model, inputs) => {
            println!("\n{}", "🧾 General assumptions: skipped".yellow());
            for result in [dcf_model, inputs] {
                if let Err(error) = result {
                    println!("   {}", error.to_string().yellow());
                }
            }
        }
    }

    Ok(())
}

fn print_fields(columns: &[&'static str], values: &HashMap<&'static str, CellValue>) {
    for column in columns {
        match values.get(column) {
            Some(value) => println!(
                "   {:<26} {}",
                column.bright_blue(),
                value.to_text().bold()
            ),
            None => println!("   {:<26} {}", column.bright_blue(), "—".yellow()),
        }
    }
}

/// Execute the check command: verify each workbook opens and carries the
/// expected sheets. Errors only if a workbook is missing its FMV sheet.
pub fn check(files: Vec<PathBuf>) -> ExtractResult<()> {
    println!("{}", "✅ Checking workbooks".bold().green());
    println!();

    let mut failures = 0usize;
    for file in &files {
        let name = file.display();
        let workbook = match ExcelWorkbook::open(file) {
            Ok(workbook) => workbook,
            Err(error) => {
                println!("   {} {}: {}", "❌".red(), name, error.to_string().red());
                failures += 1;
                continue;
            }
        };
        if !workbook.has_sheet(SheetKind::Fmv.sheet_name()) {
            println!("   {} {}: no FMV sheet", "❌".red(), name);
            failures += 1;
            continue;
        }
        let missing_aux: Vec<&str> = [SheetKind::DcfModel, SheetKind::Inputs]
            .iter()
            .map(|kind| kind.sheet_name())
            .filter(|sheet| !workbook.has_sheet(sheet))
            .collect();
        if missing_aux.is_empty() {
            println!("   {} {}", "✅".green(), name);
        } else {
            println!(
                "   {} {}: assumptions sheets missing ({})",
                "⚠️".yellow(),
                name,
                missing_aux.join(", ")
            );
        }
    }

    println!();
    if failures > 0 {
        Err(ExtractError::Check(format!(
            "{failures} of {} workbooks unusable",
            files.len()
        )))
    } else {
        println!("{}", "All workbooks usable".bold().green());
        Ok(())
    }
}
