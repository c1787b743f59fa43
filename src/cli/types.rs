//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::models::Config;

#[derive(Parser, Debug)]
#[command(name = "bugsweep")]
#[command(about = "Run SpotBugs or FindBugs over compiled classes in an isolated JVM", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to bugsweep.yaml and bugsweep.local.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Debug logging, and debug output from the analysis tool itself
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the configured class files
    Analyze(AnalyzeArgs),

    /// Check that the tool classpath works with the installed Java
    CheckClasspath(OverrideArgs),

    /// Print the invocation spec and worker command line without running it
    Spec(OverrideArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    /// Report findings as a warning instead of failing
    #[arg(long)]
    pub ignore_failures: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Command line settings that take precedence over the configuration.
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Directory the worker runs in; relative paths resolve against it
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

impl OverrideArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.working_dir {
            config.working_dir.clone_from(dir);
        }
    }
}

impl AnalyzeArgs {
    pub fn apply(&self, config: &mut Config) {
        self.overrides.apply(config);
        if self.ignore_failures {
            config.analysis.ignore_failures = true;
        }
    }
}
