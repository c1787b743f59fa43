//! Worker manager
//!
//! Runs one analysis worker to completion and converts whatever happens into
//! an [`AnalysisResult`]. Failures to start or talk to the worker are captured
//! in the result, so the evaluator sees every outcome through one path.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::worker_arguments::{self, FilterFiles};
use super::worker_summary::WorkerSummary;
use crate::domain::errors::WorkerError;
use crate::domain::models::{AnalysisResult, InvocationSpec};
use crate::domain::ports::WorkerProcessFactory;

const DEFAULT_TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// Spawns analysis workers and waits for them.
pub struct WorkerManager {
    cancel: CancellationToken,
    termination_grace: Duration,
}

impl WorkerManager {
    /// Create a manager whose workers are terminated when `cancel` fires.
    pub const fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            termination_grace: DEFAULT_TERMINATION_GRACE,
        }
    }

    /// Time a cancelled worker gets to exit after SIGTERM before it is killed.
    #[must_use]
    pub const fn with_termination_grace(mut self, grace: Duration) -> Self {
        self.termination_grace = grace;
        self
    }

    /// Run one worker over `spec` and block until it finishes or is cancelled.
    ///
    /// Never fails: errors are captured in [`AnalysisResult::failure`].
    #[instrument(skip_all, fields(working_dir = %working_dir.display()))]
    pub async fn run(
        &self,
        working_dir: &Path,
        factory: &dyn WorkerProcessFactory,
        tool_classpath: &[PathBuf],
        spec: InvocationSpec,
    ) -> AnalysisResult {
        match self.try_run(working_dir, factory, tool_classpath, &spec).await {
            Ok(result) => {
                info!(
                    bugs = result.bug_count,
                    errors = result.error_count,
                    missing_classes = result.missing_class_count,
                    "analysis worker finished"
                );
                if result.missing_class_count > 0 {
                    warn!(
                        missing_classes = result.missing_class_count,
                        "classes referenced by the analyzed code are missing from the classpath"
                    );
                }
                result
            }
            Err(error) => {
                warn!(error = %error, "analysis worker failed");
                AnalysisResult::failed(error)
            }
        }
    }

    async fn try_run(
        &self,
        working_dir: &Path,
        factory: &dyn WorkerProcessFactory,
        tool_classpath: &[PathBuf],
        spec: &InvocationSpec,
    ) -> Result<AnalysisResult, WorkerError> {
        prepare_report_destinations(spec).await?;

        // Removed when dropped, on every exit path below.
        let scratch = if FilterFiles::planned(spec, working_dir).is_empty() {
            None
        } else {
            Some(
                tempfile::Builder::new()
                    .prefix(".bugsweep-")
                    .tempdir_in(working_dir)
                    .map_err(|source| WorkerError::Prepare {
                        path: working_dir.to_path_buf(),
                        source,
                    })?,
            )
        };
        let filters = match &scratch {
            Some(scratch) => FilterFiles::write(spec, scratch.path()).await?,
            None => FilterFiles::default(),
        };

        let launch = worker_arguments::launch(working_dir, tool_classpath, spec, &filters)?;

        let mut command = factory.command(&launch)?;
        command
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so termination also reaches anything the worker started.
        #[cfg(unix)]
        command.process_group(0);

        let program = command
            .as_std()
            .get_program()
            .to_string_lossy()
            .into_owned();
        info!(program = %program, "starting analysis worker");
        debug!(args = ?launch.tool_args, jvm_args = ?launch.jvm_args, "worker arguments");

        let mut child = command
            .spawn()
            .map_err(|source| WorkerError::Spawn { program, source })?;

        let pid = child.id();

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("worker stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("worker stderr was not captured"))?;

        let mut stdout_task = tokio::spawn(stream_output(stdout, "stdout"));
        let mut stderr_task = tokio::spawn(stream_output(stderr, "stderr"));

        let status = tokio::select! {
            status = child.wait() => Some(status?),
            () = self.cancel.cancelled() => None,
        };

        let Some(status) = status else {
            self.terminate(&mut child).await;
            stdout_task.abort();
            stderr_task.abort();
            return Err(WorkerError::Terminated);
        };

        debug!(?status, "analysis worker exited");

        // Anything the worker left running may still hold its output pipes.
        let drained = tokio::select! {
            drained = async { tokio::join!(&mut stdout_task, &mut stderr_task) } => Some(drained),
            () = self.cancel.cancelled() => None,
        };

        let Some((stdout_summary, stderr_summary)) = drained else {
            warn!("cancellation requested while reading worker output");
            stdout_task.abort();
            stderr_task.abort();
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
            return Err(WorkerError::Terminated);
        };

        let stdout_summary = stdout_summary.map_err(io::Error::other)??;
        let stderr_summary = stderr_summary.map_err(io::Error::other)??;

        Ok(stderr_summary.merge(stdout_summary).into_result(status.code()))
    }

    async fn terminate(&self, child: &mut Child) {
        warn!("cancellation requested, terminating analysis worker");
        let pid = child.id();

        #[cfg(unix)]
        if let Some(group) = pid.and_then(|pid| i32::try_from(pid).ok()) {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            if killpg(Pid::from_raw(group), Signal::SIGTERM).is_ok() {
                if let Ok(Ok(status)) =
                    tokio::time::timeout(self.termination_grace, child.wait()).await
                {
                    debug!(?status, "analysis worker exited after SIGTERM");
                    kill_process_group(group.unsigned_abs());
                    return;
                }
                warn!("analysis worker ignored SIGTERM, killing it");
            }
        }

        if let Err(error) = child.kill().await {
            warn!(error = %error, "failed to kill analysis worker");
        }
        if let Some(pid) = pid {
            kill_process_group(pid);
        }
    }
}

/// SIGKILL whatever is left in the worker's process group.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Ok(group) = i32::try_from(pid) {
        // ESRCH once the whole group is gone.
        let _ = killpg(Pid::from_raw(group), Signal::SIGKILL);
    }
}

#[cfg(not(unix))]
const fn kill_process_group(_pid: u32) {}

/// Mirror one worker stream into the debug log, line by line.
async fn stream_output<R>(reader: R, stream: &'static str) -> io::Result<WorkerSummary>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut summary = WorkerSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        debug!(target: "bugsweep::worker", stream, "{line}");
        summary.observe(line);
    }

    Ok(summary)
}

/// The tool writes the reports; it does not create their directories.
async fn prepare_report_destinations(spec: &InvocationSpec) -> Result<(), WorkerError> {
    for report in spec.reports().iter().filter(|report| report.enabled) {
        if let Some(parent) = report.destination().parent() {
            if parent.as_os_str().is_empty() {
                continue;
            }
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| WorkerError::Prepare {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }
    Ok(())
}
