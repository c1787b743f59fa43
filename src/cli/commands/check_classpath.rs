//! Implementation of the `bugsweep check-classpath` command.

use anyhow::Result;
use console::style;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::build_pipeline;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::OverrideArgs;
use crate::domain::models::Config;
use crate::infrastructure::config::{resolve, working_dir};
use crate::services::ToolVersion;

#[derive(Debug, Serialize)]
pub struct CheckClasspathOutput {
    pub java_version: u32,
    #[serde(flatten)]
    pub tool: ToolVersion,
}

impl CommandOutput for CheckClasspathOutput {
    fn to_human(&self) -> String {
        format!(
            "{} {} {} (from {}) runs on Java {}",
            style("✓").green().bold(),
            self.tool.family,
            self.tool.version,
            self.tool.file,
            self.java_version
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    args: OverrideArgs,
    mut config: Config,
    debug: bool,
    json_mode: bool,
) -> Result<()> {
    args.apply(&mut config);
    let working_dir = working_dir(&config)?;
    let inputs = resolve(&config).await?;

    let pipeline = build_pipeline(&config, &working_dir, debug, CancellationToken::new()).await?;
    let tool = pipeline.validate_classpath(&inputs.tool_classpath)?;

    output(
        &CheckClasspathOutput {
            java_version: pipeline.java_version(),
            tool,
        },
        json_mode,
    );
    Ok(())
}
