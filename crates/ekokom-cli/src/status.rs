//! One-line outcome message for the caller's status channel.

use ekokom_core::CoreError;
use ekokom_ingest::IngestError;
use ekokom_report::ReportError;

use crate::types::RunResult;

/// Error class named in the status line.
pub fn error_class(error: &anyhow::Error) -> &'static str {
    for cause in error.chain() {
        if let Some(ingest) = cause.downcast_ref::<IngestError>() {
            return ingest.kind().as_str();
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return match core.kind() {
                Some(kind) => kind.as_str(),
                None => "ConfigError",
            };
        }
        if cause.downcast_ref::<ReportError>().is_some() {
            return "OutputError";
        }
    }
    "Error"
}

pub fn success_message(result: &RunResult) -> String {
    let mut message = if result.dry_run {
        "Dry run complete, no files written".to_string()
    } else {
        let paths: Vec<String> = result
            .outputs
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        format!("Processing complete: {}", paths.join(", "))
    };
    let notes = result.diagnostics.notes().len();
    if notes > 0 {
        message.push_str(&format!(" ({notes} warning(s))"));
    }
    message
}

pub fn failure_message(error: &anyhow::Error) -> String {
    format!("{}: {error:#}", error_class(error))
}
