//! Worker process port - how an isolated analysis worker is started.

use std::path::PathBuf;

use tokio::process::Command;

use crate::domain::errors::WorkerError;

/// Everything needed to start one worker, independent of the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerLaunch {
    /// Directory the worker runs in
    pub working_dir: PathBuf,
    /// Tool classpath followed by the plugin classpath
    pub classpath: Vec<PathBuf>,
    /// Worker VM options, heap limit first
    pub jvm_args: Vec<String>,
    /// Arguments for the analysis tool itself
    pub tool_args: Vec<String>,
}

/// Creates worker process commands.
///
/// Implementations only decide *what* runs. The worker manager owns the
/// process lifetime: working directory, piped stdio and termination.
pub trait WorkerProcessFactory: Send + Sync {
    fn command(&self, launch: &WorkerLaunch) -> Result<Command, WorkerError>;
}
