//! Implementation of the `bugsweep analyze` command.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::build_pipeline;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::AnalyzeArgs;
use crate::domain::models::{Config, TaskOutcome};
use crate::domain::ports::ReportContainer;
use crate::infrastructure::config::{resolve, working_dir};

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub tool: String,
    pub outcome: TaskOutcome,
    pub reports: Vec<PathBuf>,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![match &self.outcome {
            TaskOutcome::Skipped => format!(
                "{} No class files to analyze, {} was not run",
                style("-").dim(),
                self.tool
            ),
            TaskOutcome::Passed => {
                format!("{} {} analysis passed", style("✓").green().bold(), self.tool)
            }
            TaskOutcome::PassedWithWarning(message) => {
                format!("{} {message}", style("!").yellow().bold())
            }
        }];
        if self.outcome != TaskOutcome::Skipped {
            for report in &self.reports {
                lines.push(format!("  report: {}", report.display()));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    args: AnalyzeArgs,
    mut config: Config,
    debug: bool,
    json_mode: bool,
) -> Result<()> {
    args.apply(&mut config);
    let working_dir = working_dir(&config)?;
    let inputs = resolve(&config).await?;

    let cancel = CancellationToken::new();
    let pipeline = build_pipeline(&config, &working_dir, debug, cancel.clone()).await?;

    let interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping analysis");
            interrupt.cancel();
        }
    });

    let outcome = pipeline.execute(&inputs).await;
    watcher.abort();

    let output_data = AnalyzeOutput {
        tool: pipeline.tool_name(&inputs.tool_classpath),
        outcome: outcome?,
        reports: inputs
            .reports()
            .iter()
            .filter(|report| report.enabled)
            .map(|report| report.destination().to_path_buf())
            .collect(),
    };

    output(&output_data, json_mode);
    Ok(())
}
