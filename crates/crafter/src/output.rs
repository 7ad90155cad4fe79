//! Output helpers for the `crafter` CLI.

use std::io::{self, Write};

use anyhow::Error;
use crafter_config::ConfigError;
use crafter_core::{CraftError, ValidationError};
use crafter_core::plan_file::PlanFileError;
use serde::Serialize;

/// Print a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Classifies an error for the `kind` field of JSON error output.
pub fn error_kind(err: &Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CraftError>() {
            return e.kind().as_str();
        }
        if cause.is::<ValidationError>() {
            return "validation";
        }
        if let Some(e) = cause.downcast_ref::<PlanFileError>() {
            return match e {
                PlanFileError::Formula(inner) => inner.kind().as_str(),
                PlanFileError::Recipe(_) => "validation",
                PlanFileError::Parse(_) | PlanFileError::Io(_) => "plan-file",
            };
        }
        if cause.is::<ConfigError>() {
            return "config";
        }
    }
    "other"
}
