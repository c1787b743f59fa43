//! The immutable invocation specification handed to the analysis worker.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::report::ReportDescriptor;

/// Analysis effort level.
///
/// Higher levels increase precision and find more bugs at the expense of
/// running time and memory consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Min,
    Default,
    Max,
}

impl Effort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Default => "default",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority threshold for reporting bugs.
///
/// `low` reports everything, `medium` reports medium and high priority bugs,
/// `high` reports only high priority bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Low,
    Medium,
    High,
}

impl ReportLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the worker needs to run one analysis.
///
/// Only [`InvocationSpecBuilder`](crate::services::InvocationSpecBuilder)
/// constructs this; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationSpec {
    pub(crate) class_roots: Vec<PathBuf>,
    pub(crate) source_roots: Vec<PathBuf>,
    pub(crate) classpath: Vec<PathBuf>,
    pub(crate) plugin_classpath: Vec<PathBuf>,
    pub(crate) effort: Option<Effort>,
    pub(crate) report_level: Option<ReportLevel>,
    pub(crate) max_heap_size: Option<String>,
    pub(crate) visitors: Vec<String>,
    pub(crate) omit_visitors: Vec<String>,
    pub(crate) include_filter: Option<String>,
    pub(crate) exclude_filter: Option<String>,
    pub(crate) exclude_bugs_filter: Option<String>,
    pub(crate) extra_args: Vec<String>,
    pub(crate) jvm_args: Vec<String>,
    pub(crate) debug: bool,
    pub(crate) show_progress: bool,
    pub(crate) reports: Vec<ReportDescriptor>,
}

impl InvocationSpec {
    pub fn class_roots(&self) -> &[PathBuf] {
        &self.class_roots
    }

    pub fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }

    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    pub fn plugin_classpath(&self) -> &[PathBuf] {
        &self.plugin_classpath
    }

    pub const fn effort(&self) -> Option<Effort> {
        self.effort
    }

    pub const fn report_level(&self) -> Option<ReportLevel> {
        self.report_level
    }

    pub fn max_heap_size(&self) -> Option<&str> {
        self.max_heap_size.as_deref()
    }

    pub fn visitors(&self) -> &[String] {
        &self.visitors
    }

    pub fn omit_visitors(&self) -> &[String] {
        &self.omit_visitors
    }

    pub fn include_filter(&self) -> Option<&str> {
        self.include_filter.as_deref()
    }

    pub fn exclude_filter(&self) -> Option<&str> {
        self.exclude_filter.as_deref()
    }

    /// Baseline filter: bugs matching it are excluded from the report.
    pub fn exclude_bugs_filter(&self) -> Option<&str> {
        self.exclude_bugs_filter.as_deref()
    }

    /// Passed to the tool verbatim, after the options bugsweep understands.
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    pub fn jvm_args(&self) -> &[String] {
        &self.jvm_args
    }

    pub const fn debug(&self) -> bool {
        self.debug
    }

    pub const fn show_progress(&self) -> bool {
        self.show_progress
    }

    pub fn reports(&self) -> &[ReportDescriptor] {
        &self.reports
    }
}
