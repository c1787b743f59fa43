//! Domain errors for the bugsweep analysis pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Pre-flight rejection of the tool classpath.
///
/// Raised before any worker is spawned and never retried: the classpath
/// does not change within one run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClasspathError {
    #[error(
        "The version of {tool} ({version}) inferred from {file} is too high to work with the \
         current Java version ({actual}). It requires Java {required} or newer. Please use a \
         lower version of {tool} or a newer version of Java."
    )]
    ToolTooNew {
        tool: String,
        file: String,
        version: String,
        required: u32,
        actual: u32,
    },

    #[error(
        "The version of {tool} ({version}) inferred from {file} is too low to work with the \
         current Java version ({actual}). It supports Java {supported} at most. Please use a \
         higher version of {tool}."
    )]
    ToolTooOld {
        tool: String,
        file: String,
        version: String,
        supported: u32,
        actual: u32,
    },

    #[error("Unable to infer the analysis tool version from the tool classpath: [{}]", .0.join(", "))]
    UnknownToolVersion(Vec<String>),
}

impl ClasspathError {
    /// The classpath entry that caused the rejection, if one was identified.
    pub fn offending_file(&self) -> Option<&str> {
        match self {
            Self::ToolTooNew { file, .. } | Self::ToolTooOld { file, .. } => Some(file),
            Self::UnknownToolVersion(_) => None,
        }
    }
}

/// Failure to run or talk to the worker process.
///
/// Never propagated with `?` out of the worker manager; it is captured into
/// [`AnalysisResult`](crate::domain::models::AnalysisResult) instead.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Failed to spawn worker process `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to prepare worker input {}: {source}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid classpath entry for worker process: {0}")]
    InvalidClasspath(#[from] std::env::JoinPathsError),

    #[error("Failed to communicate with worker process: {0}")]
    Io(#[from] io::Error),

    #[error("Worker process was terminated before completing")]
    Terminated,

    #[error("Worker process crashed ({status}) without reporting analysis results")]
    Crashed { status: String },
}

/// The build failure produced by the result evaluator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub message: String,
    #[source]
    pub cause: Option<WorkerError>,
}

impl AnalysisFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: WorkerError) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }
}

/// Anything that stops the pipeline from producing a passing verdict.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Classpath(#[from] ClasspathError),

    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),

    #[error("Failed to inspect class-file roots: {0}")]
    ClassRoots(#[from] walkdir::Error),

    #[error("Class-file scan did not complete: {0}")]
    ClassScan(tokio::task::JoinError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
