//! CLI command implementations.

pub mod analyze;
pub mod check_classpath;
pub mod spec;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, Level};

use crate::adapters::java::{detect_java_version, JavaWorkerProcessFactory};
use crate::application::AnalysisPipeline;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load the configuration from `path`, or from the default locations.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Java major version: configured, or detected from the launcher.
pub async fn java_version(config: &Config) -> Result<u32> {
    if let Some(version) = config.java.version {
        return Ok(version);
    }
    let version = detect_java_version(&config.java.executable)
        .await
        .context("Set java.version to skip detection")?;
    debug!(version, executable = %config.java.executable.display(), "detected java version");
    Ok(version)
}

/// Pipeline wired to a real `java` launcher.
pub async fn build_pipeline(
    config: &Config,
    working_dir: &Path,
    debug: bool,
    cancel: CancellationToken,
) -> Result<AnalysisPipeline<JavaWorkerProcessFactory>> {
    let factory =
        JavaWorkerProcessFactory::new(&config.java.executable, config.tool.main_class.as_str());
    let pipeline =
        AnalysisPipeline::new(factory, working_dir, java_version(config).await?, cancel)
            .with_debugging(debug || tracing::enabled!(Level::DEBUG))
            .with_termination_grace(Duration::from_secs(config.java.termination_grace_secs));
    Ok(match &config.tool.name {
        Some(name) => pipeline.with_tool_name(name.as_str()),
        None => pipeline,
    })
}
