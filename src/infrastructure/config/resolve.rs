//! Turns a loaded [`Config`] into the immutable [`AnalysisInputs`] value.

use std::path::{Path, PathBuf};

use crate::domain::models::{
    AnalysisConfig, AnalysisInputs, Config, ReportConfig, ReportDescriptor, TextResource,
};

use super::loader::ConfigError;

/// Absolute working directory of a configuration.
pub fn working_dir(config: &Config) -> Result<PathBuf, ConfigError> {
    std::path::absolute(&config.working_dir).map_err(|source| ConfigError::WorkingDir {
        path: config.working_dir.clone(),
        source,
    })
}

/// Resolve relative paths against the working directory, read filter files
/// and give every report a destination.
pub async fn resolve(config: &Config) -> Result<AnalysisInputs, ConfigError> {
    let base = working_dir(config)?;
    let analysis = &config.analysis;

    Ok(AnalysisInputs {
        class_roots: absolutize(&base, &analysis.classes),
        source_roots: absolutize(&base, &analysis.sources),
        classpath: absolutize(&base, &analysis.classpath),
        tool_classpath: absolutize(&base, &analysis.tool_classpath),
        plugin_classpath: absolutize(&base, &analysis.plugin_classpath),
        effort: analysis.effort,
        report_level: analysis.report_level,
        max_heap_size: analysis.max_heap_size.clone(),
        visitors: analysis.visitors.clone(),
        omit_visitors: analysis.omit_visitors.clone(),
        include_filter: read_filter(&base, analysis.include_filter.as_ref()).await?,
        exclude_filter: read_filter(&base, analysis.exclude_filter.as_ref()).await?,
        exclude_bugs_filter: read_filter(&base, analysis.exclude_bugs_filter.as_ref()).await?,
        extra_args: analysis.extra_args.clone(),
        jvm_args: analysis.jvm_args.clone(),
        show_progress: analysis.show_progress,
        ignore_failures: analysis.ignore_failures,
        reports: report_descriptors(&base, analysis),
    })
}

fn absolutize(base: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|path| base.join(path)).collect()
}

async fn read_filter(
    base: &Path,
    resource: Option<&TextResource>,
) -> Result<Option<String>, ConfigError> {
    match resource {
        None => Ok(None),
        Some(TextResource::Text(text)) => Ok(Some(text.clone())),
        Some(TextResource::File(path)) => {
            let path = base.join(path);
            tokio::fs::read_to_string(&path)
                .await
                .map(Some)
                .map_err(|source| ConfigError::FilterRead { path, source })
        }
    }
}

fn report_descriptors(base: &Path, analysis: &AnalysisConfig) -> Vec<ReportDescriptor> {
    analysis
        .reports
        .iter()
        .map(|report: &ReportConfig| {
            let destination = report.destination.as_ref().map_or_else(
                || {
                    base.join(&analysis.reports_dir)
                        .join(format!("main.{}", report.format.extension()))
                },
                |destination| base.join(destination),
            );
            ReportDescriptor::new(report.format, report.enabled, destination)
        })
        .collect()
}
