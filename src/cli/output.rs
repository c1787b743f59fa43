//! Output formatting utilities for the CLI.

use std::process::ExitCode;

use console::style;
use serde::Serialize;

use crate::domain::errors::PipelineError;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Exit status for a failed command: 1 when the analysis itself failed the
/// build, 2 for configuration, classpath and environment problems.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Analysis(_)) => 1,
        _ => 2,
    }
}

/// Print `err` and turn it into the process exit status.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ExitCode {
    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let value = serde_json::json!({
            "status": "failed",
            "message": err.to_string(),
            "causes": causes,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    ExitCode::from(exit_code(err))
}
