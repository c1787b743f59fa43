//! Worker results and pipeline verdicts.

use serde::Serialize;

use crate::domain::errors::{AnalysisFailure, WorkerError};

/// Structured outcome of one worker run.
///
/// The three parts are not mutually exclusive: a run may capture a failure
/// and still have counted some findings before it did.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// Failure spawning or talking to the worker.
    pub failure: Option<WorkerError>,
    /// Tool-internal failures, e.g. class files the tool could not parse.
    pub error_count: u32,
    /// Findings.
    pub bug_count: u32,
    /// Classes referenced by the analyzed code but absent from the classpath.
    pub missing_class_count: u32,
}

impl AnalysisResult {
    pub fn counts(bug_count: u32, error_count: u32) -> Self {
        Self {
            bug_count,
            error_count,
            ..Self::default()
        }
    }

    pub fn failed(failure: WorkerError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_missing_classes(mut self, missing_class_count: u32) -> Self {
        self.missing_class_count = missing_class_count;
        self
    }
}

/// Verdict of the result evaluator.
#[derive(Debug)]
pub enum Outcome {
    Pass,
    /// Findings tolerated by `ignore_failures`; the build proceeds.
    Warn(String),
    Fail(AnalysisFailure),
}

impl Outcome {
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

/// What the pipeline reports back to the invoking build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// No class files to analyze; nothing was spawned.
    Skipped,
    Passed,
    PassedWithWarning(String),
}
