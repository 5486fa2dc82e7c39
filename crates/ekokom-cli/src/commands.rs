use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use ekokom_core::{EngineConfig, InputFile, load_inputs, run_engine};
use ekokom_report::{
    DOMESTIC_VIEW, FOREIGN_VIEW, WriteMode, assemble_report, csv_view_path, ensure_distinct,
    ensure_writable, write_csv, write_snapshot, write_xlsx,
};

use crate::cli::{CategoriesArgs, OutputFormatArg, ReportArgs};
use crate::summary::{apply_table_style, format_coefficient};
use crate::types::RunResult;

/// Delimiter of CSV report files.
const REPORT_CSV_DELIMITER: u8 = b',';

pub fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path).context("load engine config"),
        None => Ok(EngineConfig::default()),
    }
}

pub fn run_categories(args: &CategoriesArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    if args.json {
        println!("{}", config.to_json_pretty().context("serialize config")?);
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        "Category",
        "Pattern",
        "Plastic [kg/unit]",
        "Paper [kg/unit]",
        "Units per box",
    ]);
    apply_table_style(&mut table);
    for (_, category) in config.categories.iter() {
        table.add_row(vec![
            category.name.clone(),
            category.match_pattern.clone(),
            format_coefficient(category.coefficient_plastic),
            format_coefficient(category.coefficient_paper),
            format_coefficient(category.cardboard_units_per_box),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn default_output(format: OutputFormatArg) -> PathBuf {
    PathBuf::from(format!("ekokom.{}", format.extension()))
}

/// Every file a non-dry run writes: report files first, then the snapshot.
pub fn output_targets(args: &ReportArgs, output: &Path) -> Vec<PathBuf> {
    let mut targets = match args.format {
        OutputFormatArg::Xlsx => vec![output.to_path_buf()],
        OutputFormatArg::Csv => [DOMESTIC_VIEW, FOREIGN_VIEW]
            .into_iter()
            .map(|view| csv_view_path(output, view))
            .collect(),
    };
    targets.extend(args.snapshot.clone());
    targets
}

pub fn run_report(args: &ReportArgs) -> Result<RunResult> {
    let run_span = info_span!("report", ledger = %args.ledger.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let config = load_config(args.config.as_ref())?;
    let mode = if args.force {
        WriteMode::Overwrite
    } else {
        WriteMode::CreateNew
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(args.format));

    // Refuse colliding or stale artifacts before doing any work.
    let targets = output_targets(args, &output);
    ensure_distinct(&targets).context("check output paths")?;
    if !args.dry_run {
        ensure_writable(&targets, mode).context("check output paths")?;
    }

    let ledger = InputFile::new(&args.ledger, args.ledger_delimiter);
    let registry = InputFile::new(&args.registry, args.registry_delimiter);
    let inputs = load_inputs(&ledger, &registry, &config).context("load inputs")?;
    let engine = run_engine(inputs, &config).context("run engine")?;

    let mut outputs = Vec::new();
    let mut snapshot = None;
    if args.dry_run {
        info!("dry run, no files written");
    } else {
        let write_span = info_span!("write", output = %output.display());
        let _write_guard = write_span.enter();
        let report = assemble_report(&engine.aggregation);
        match args.format {
            OutputFormatArg::Xlsx => {
                write_xlsx(&report, &output, mode).context("write XLSX report")?;
                outputs.push(output.clone());
            }
            OutputFormatArg::Csv => {
                let written = write_csv(&report, &output, REPORT_CSV_DELIMITER, mode)
                    .context("write CSV report")?;
                outputs.extend(written);
            }
        }
        if let Some(path) = &args.snapshot {
            write_snapshot(&engine.snapshot, path, mode).context("write snapshot")?;
            snapshot = Some(path.clone());
        }
    }

    info!(
        outputs = outputs.len(),
        duration_ms = start.elapsed().as_millis(),
        "report complete"
    );
    Ok(RunResult {
        ledger: args.ledger.clone(),
        registry: args.registry.clone(),
        aggregation: engine.aggregation,
        diagnostics: engine.diagnostics,
        outputs,
        snapshot,
        dry_run: args.dry_run,
    })
}
