//! Integration tests for the `report` and `categories` commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use ekokom_cli::cli::{Cli, Command, OutputFormatArg, ReportArgs};
use ekokom_cli::commands::run_report;
use ekokom_cli::status::{error_class, failure_message, success_message};
use ekokom_ingest::Delimiter;

const LEDGER: &str = "Číslo dokladu,Dodavatel,Typ zboží,Množství celkem\n\
                      1,ACME Corp,Obleceni pruhovane,100\n\
                      2,Globex s.r.o.,Kabelky,12\n\
                      3,Initech,Boty,4\n";
const REGISTRY: &str = "Dodavel;CZ ano/ne\nACME;ano\nGlobex;ne\n";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn args(dir: &Path) -> ReportArgs {
    ReportArgs {
        ledger: write(dir, "Q1_25.csv", LEDGER),
        registry: write(dir, "dodavatele.csv", REGISTRY),
        ledger_delimiter: Delimiter::COMMA,
        registry_delimiter: Delimiter::SEMICOLON,
        config: None,
        output: Some(dir.join("ekokom.xlsx")),
        format: OutputFormatArg::Xlsx,
        force: false,
        snapshot: None,
        dry_run: false,
    }
}

#[test]
fn parses_report_flags() {
    let cli = Cli::try_parse_from([
        "ekokom",
        "report",
        "ledger.csv",
        "registry.csv",
        "--registry-delimiter",
        "auto",
        "--format",
        "csv",
        "--force",
    ])
    .expect("parse");
    let Command::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(args.ledger_delimiter, Delimiter::COMMA);
    assert_eq!(args.registry_delimiter, Delimiter::Auto);
    assert_eq!(args.format, OutputFormatArg::Csv);
    assert!(args.force);
    assert!(!args.dry_run);
}

#[test]
fn rejects_multi_character_delimiter() {
    let result = Cli::try_parse_from([
        "ekokom",
        "report",
        "ledger.csv",
        "registry.csv",
        "--ledger-delimiter",
        ";;",
    ]);
    assert!(result.is_err());
}

#[test]
fn writes_workbook_and_reports_success() {
    let dir = tempfile::tempdir().expect("temp dir");
    let args = args(dir.path());
    let result = run_report(&args).expect("run report");

    assert_eq!(result.outputs, vec![dir.path().join("ekokom.xlsx")]);
    assert!(result.outputs[0].is_file());
    assert_eq!(result.diagnostics.unmatched_shipments, 1);
    assert_eq!(result.aggregation.domestic.groups.len(), 1);
    assert_eq!(result.aggregation.foreign.groups.len(), 1);

    let message = success_message(&result);
    assert!(message.starts_with("Processing complete: "));
    assert!(message.ends_with("(1 warning(s))"));
}

#[test]
fn refuses_existing_output_without_force() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    fs::write(dir.path().join("ekokom.xlsx"), "stale").expect("write stale");

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "OutputError");
    assert_eq!(
        fs::read_to_string(dir.path().join("ekokom.xlsx")).expect("read stale"),
        "stale"
    );

    args.force = true;
    run_report(&args).expect("forced run");
    assert!(fs::read(dir.path().join("ekokom.xlsx")).expect("read").starts_with(b"PK"));
}

#[test]
fn snapshot_colliding_with_report_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.snapshot = args.output.clone();

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "OutputError");
    assert!(!dir.path().join("ekokom.xlsx").exists());

    args.force = true;
    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "OutputError");
    assert!(!dir.path().join("ekokom.xlsx").exists());
}

#[test]
fn snapshot_colliding_with_csv_view_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.format = OutputFormatArg::Csv;
    args.output = Some(dir.path().join("ekokom.csv"));
    args.snapshot = Some(dir.path().join("ekokom_ekokom_import.csv"));
    args.force = true;

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "OutputError");
    assert!(!dir.path().join("ekokom_ekokom_CZ.csv").exists());
    assert!(!dir.path().join("ekokom_ekokom_import.csv").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.dry_run = true;
    args.snapshot = Some(dir.path().join("snapshot.json"));

    let result = run_report(&args).expect("dry run");
    assert!(result.outputs.is_empty());
    assert!(result.snapshot.is_none());
    assert!(!dir.path().join("ekokom.xlsx").exists());
    assert!(!dir.path().join("snapshot.json").exists());
    assert!(success_message(&result).starts_with("Dry run complete"));
}

#[test]
fn csv_format_and_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.format = OutputFormatArg::Csv;
    args.output = Some(dir.path().join("ekokom.csv"));
    args.snapshot = Some(dir.path().join("snapshot.json"));

    let result = run_report(&args).expect("run report");
    assert_eq!(
        result.outputs,
        vec![
            dir.path().join("ekokom_ekokom_CZ.csv"),
            dir.path().join("ekokom_ekokom_import.csv"),
        ]
    );
    let import = fs::read_to_string(&result.outputs[1]).expect("read import view");
    assert!(import.contains("Globex s.r.o.,Kabelky,12,ne,1668,0,1235"));
    assert!(dir.path().join("snapshot.json").is_file());
}

#[test]
fn missing_ledger_is_input_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.ledger = dir.path().join("missing.csv");

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "InputNotFoundError");
    assert!(failure_message(&error).contains("missing.csv"));
    assert!(!dir.path().join("ekokom.xlsx").exists());
}

#[test]
fn empty_registry_is_format_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.registry = write(dir.path(), "empty.csv", "");

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "FormatError");
}

#[test]
fn invalid_config_is_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut args = args(dir.path());
    args.config = Some(write(dir.path(), "config.json", r#"{"categories": []}"#));

    let error = run_report(&args).unwrap_err();
    assert_eq!(error_class(&error), "ConfigError");
}
