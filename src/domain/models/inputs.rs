//! Resolved, immutable analysis inputs.
//!
//! Produced from [`Config`](super::Config) once paths are absolute and filter
//! resources have been read. The pipeline only ever sees this value.

use std::path::PathBuf;

use super::invocation::{Effort, ReportLevel};
use super::report::ReportDescriptor;
use crate::domain::ports::{FailurePolicy, ReportContainer, SourceProvider};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisInputs {
    pub class_roots: Vec<PathBuf>,
    pub source_roots: Vec<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub tool_classpath: Vec<PathBuf>,
    pub plugin_classpath: Vec<PathBuf>,
    pub effort: Option<Effort>,
    pub report_level: Option<ReportLevel>,
    pub max_heap_size: Option<String>,
    pub visitors: Vec<String>,
    pub omit_visitors: Vec<String>,
    pub include_filter: Option<String>,
    pub exclude_filter: Option<String>,
    pub exclude_bugs_filter: Option<String>,
    pub extra_args: Vec<String>,
    pub jvm_args: Vec<String>,
    pub show_progress: bool,
    pub ignore_failures: bool,
    pub reports: Vec<ReportDescriptor>,
}

impl SourceProvider for AnalysisInputs {
    fn class_roots(&self) -> &[PathBuf] {
        &self.class_roots
    }

    fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }
}

impl FailurePolicy for AnalysisInputs {
    fn ignore_failures(&self) -> bool {
        self.ignore_failures
    }
}

impl ReportContainer for AnalysisInputs {
    fn reports(&self) -> &[ReportDescriptor] {
        &self.reports
    }
}
