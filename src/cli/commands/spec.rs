//! Implementation of the `bugsweep spec` command: a dry run that shows what
//! `analyze` would launch.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::build_pipeline;
use crate::application::{launch, FilterFiles};
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::OverrideArgs;
use crate::domain::models::{Config, InvocationSpec};
use crate::infrastructure::config::{resolve, working_dir};

/// Stands in for the per-run scratch directory holding filter files.
const SCRATCH_PLACEHOLDER: &str = "<scratch>";

#[derive(Debug, Serialize)]
pub struct SpecOutput {
    pub spec: InvocationSpec,
    pub command: Vec<String>,
}

impl CommandOutput for SpecOutput {
    fn to_human(&self) -> String {
        let spec = serde_yaml::to_string(&self.spec).unwrap_or_default();
        format!(
            "{}\n{}\n{}\n{}",
            style("Invocation spec:").bold(),
            spec.trim_end(),
            style("Worker command:").bold(),
            self.command.join(" ")
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
    pipeline.validate_classpath(&inputs.tool_classpath)?;
    let spec = pipeline.generate_spec(&inputs);

    let filters = FilterFiles::planned(&spec, &working_dir.join(SCRATCH_PLACEHOLDER));
    let launch = launch(&working_dir, &inputs.tool_classpath, &spec, &filters)?;
    let mut command = vec![config.java.executable.to_string_lossy().into_owned()];
    command.extend(
        pipeline
            .factory()
            .arguments(&launch)
            .context("Failed to render worker command line")?,
    );

    output(&SpecOutput { spec, command }, json_mode);
    Ok(())
}
