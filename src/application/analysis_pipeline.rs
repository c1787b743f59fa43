//! The analysis task: validate, build, run, evaluate.
//!
//! Executed once per run, strictly in sequence. Nothing is retried.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use super::worker_manager::WorkerManager;
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{AnalysisInputs, InvocationSpec, Outcome, TaskOutcome};
use crate::domain::ports::{FailurePolicy, ReportContainer, SourceProvider, WorkerProcessFactory};
use crate::services::{
    ClasspathValidator, InvocationSpecBuilder, ResultEvaluator, ToolFamily, ToolVersion,
};

pub struct AnalysisPipeline<F> {
    factory: F,
    working_dir: PathBuf,
    validator: ClasspathValidator,
    tool_name: Option<String>,
    manager: WorkerManager,
    debug: bool,
}

impl<F: WorkerProcessFactory> AnalysisPipeline<F> {
    pub fn new(
        factory: F,
        working_dir: impl Into<PathBuf>,
        java_version: u32,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            factory,
            working_dir: working_dir.into(),
            validator: ClasspathValidator::new(java_version),
            tool_name: None,
            manager: WorkerManager::new(cancel),
            debug: false,
        }
    }

    /// Name of the analysis tool, used in failure messages instead of the
    /// family inferred from the tool jar.
    #[must_use]
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = Some(name.into());
        self
    }

    /// Ask the tool for its own debug output.
    #[must_use]
    pub const fn with_debugging(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_termination_grace(mut self, grace: Duration) -> Self {
        self.manager = self.manager.with_termination_grace(grace);
        self
    }

    pub const fn factory(&self) -> &F {
        &self.factory
    }

    pub const fn java_version(&self) -> u32 {
        self.validator.java_version()
    }

    /// Run the whole pipeline for one set of inputs.
    #[instrument(skip_all, fields(working_dir = %self.working_dir.display()))]
    pub async fn execute(&self, inputs: &AnalysisInputs) -> PipelineResult<TaskOutcome> {
        if !scan_class_roots(inputs.class_roots()).await? {
            info!("no class files to analyze, skipping");
            return Ok(TaskOutcome::Skipped);
        }

        let tool = self.validate_classpath(&inputs.tool_classpath)?;
        info!(
            tool = %tool.family,
            version = %tool.version,
            java_version = self.validator.java_version(),
            "tool classpath is compatible"
        );

        let spec = self.generate_spec(inputs);
        let reports = spec.reports().to_vec();

        let result = self
            .manager
            .run(&self.working_dir, &self.factory, &inputs.tool_classpath, spec)
            .await;

        let evaluator = ResultEvaluator::new(
            self.tool_name
                .clone()
                .unwrap_or_else(|| tool.family.to_string()),
        );
        match evaluator.evaluate(result, inputs.ignore_failures(), &reports) {
            Outcome::Pass => Ok(TaskOutcome::Passed),
            Outcome::Warn(message) => {
                warn!("{message}");
                Ok(TaskOutcome::PassedWithWarning(message))
            }
            Outcome::Fail(failure) => Err(failure.into()),
        }
    }

    /// Name used in messages: the configured one, otherwise the family of the
    /// first tool jar on `tool_classpath`.
    pub fn tool_name(&self, tool_classpath: &[PathBuf]) -> String {
        self.tool_name.clone().unwrap_or_else(|| {
            file_names(tool_classpath)
                .iter()
                .find_map(|name| ToolVersion::from_file_name(name))
                .map_or(ToolFamily::SpotBugs, |tool| tool.family)
                .to_string()
        })
    }

    /// Check the tool classpath without running anything.
    pub fn validate_classpath(&self, tool_classpath: &[PathBuf]) -> PipelineResult<ToolVersion> {
        Ok(self.validator.validate(file_names(tool_classpath))?)
    }

    pub fn generate_spec(&self, inputs: &AnalysisInputs) -> InvocationSpec {
        InvocationSpecBuilder::new(inputs.class_roots().iter().cloned())
            .with_plugins_list(inputs.plugin_classpath.iter().cloned())
            .with_sources(inputs.source_roots().iter().cloned())
            .with_classpath(inputs.classpath.iter().cloned())
            .with_debugging(self.debug)
            .with_effort(inputs.effort)
            .with_report_level(inputs.report_level)
            .with_max_heap_size(inputs.max_heap_size.clone())
            .with_visitors(inputs.visitors.iter().cloned())
            .with_omit_visitors(inputs.omit_visitors.iter().cloned())
            .with_exclude_filter(inputs.exclude_filter.clone())
            .with_include_filter(inputs.include_filter.clone())
            .with_exclude_bugs_filter(inputs.exclude_bugs_filter.clone())
            .with_extra_args(inputs.extra_args.iter().cloned())
            .with_jvm_args(inputs.jvm_args.iter().cloned())
            .with_show_progress(inputs.show_progress)
            .configure_reports(inputs.reports().iter().cloned())
            .build()
    }
}

/// File names only: compatibility is judged from jar names.
fn file_names(classpath: &[PathBuf]) -> Vec<String> {
    classpath
        .iter()
        .map(|entry| {
            entry
                .file_name()
                .unwrap_or(entry.as_os_str())
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

/// [`has_class_files`] off the async runtime.
async fn scan_class_roots(roots: &[PathBuf]) -> PipelineResult<bool> {
    let roots = roots.to_vec();
    tokio::task::spawn_blocking(move || has_class_files(&roots))
        .await
        .map_err(PipelineError::ClassScan)?
        .map_err(PipelineError::from)
}

/// An empty directory does not count: only actual files make the
/// class-file input non-empty. Missing roots are treated as empty.
pub fn has_class_files(roots: &[PathBuf]) -> Result<bool, walkdir::Error> {
    for root in roots.iter().map(PathBuf::as_path).filter(|root| root.exists()) {
        if root_has_files(root)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn root_has_files(root: &Path) -> Result<bool, walkdir::Error> {
    for entry in WalkDir::new(root) {
        if entry?.file_type().is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}
