//! Shared fixtures for pipeline integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use bugsweep::domain::models::{AnalysisInputs, ReportDescriptor, ReportFormat};
use bugsweep::{WorkerError, WorkerLaunch, WorkerProcessFactory};
use tempfile::TempDir;
use tokio::process::Command;

/// Runs a shell script in place of the JVM and counts spawns.
pub struct ScriptFactory {
    script: String,
    spawned: AtomicUsize,
}

impl ScriptFactory {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            spawned: AtomicUsize::new(0),
        }
    }

    /// A worker that reports `bugs` findings the way the tool does.
    pub fn reporting_bugs(bugs: u32) -> Self {
        let code = if bugs > 0 { 1 } else { 0 };
        Self::new(format!(
            "echo 'Warnings generated: {bugs}' >&2; echo 'Exit code set to: {code}' >&2; exit {code}"
        ))
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }
}

impl WorkerProcessFactory for ScriptFactory {
    fn command(&self, _launch: &WorkerLaunch) -> Result<Command, WorkerError> {
        self.spawned.fetch_add(1, Ordering::SeqCst);
        let mut command = Command::new("sh");
        command.arg("-c").arg(&self.script);
        Ok(command)
    }
}

/// Points at a launcher that does not exist.
pub struct MissingLauncherFactory;

impl WorkerProcessFactory for MissingLauncherFactory {
    fn command(&self, _launch: &WorkerLaunch) -> Result<Command, WorkerError> {
        Ok(Command::new("/nonexistent/bin/java"))
    }
}

/// A project directory with one compiled class.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let classes = dir.path().join("build/classes/com/example");
        std::fs::create_dir_all(&classes).expect("class dir");
        std::fs::write(classes.join("Foo.class"), b"\xCA\xFE\xBA\xBE").expect("class file");
        Self { dir }
    }

    /// A project whose class directory exists but holds nothing.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("build/classes")).expect("class dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn report_path(&self) -> PathBuf {
        self.path().join("build/reports/bugsweep/main.xml")
    }

    pub fn inputs(&self, tool_jar: &str, ignore_failures: bool) -> AnalysisInputs {
        AnalysisInputs {
            class_roots: vec![self.path().join("build/classes")],
            tool_classpath: vec![self.path().join("lib").join(tool_jar)],
            ignore_failures,
            reports: vec![
                ReportDescriptor::disabled(ReportFormat::Html, self.path().join("report.html")),
                ReportDescriptor::enabled(ReportFormat::Xml, self.report_path()),
            ],
            ..AnalysisInputs::default()
        }
    }
}
