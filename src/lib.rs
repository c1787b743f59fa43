//! bugsweep - static bytecode analysis in an isolated worker JVM
//!
//! bugsweep runs SpotBugs (or its predecessor FindBugs) over compiled class
//! files. Each run goes through four steps, strictly in sequence:
//!
//! 1. the [`ClasspathValidator`] rejects tool versions the installed Java
//!    cannot run, before anything is spawned;
//! 2. the [`InvocationSpecBuilder`] assembles an immutable [`InvocationSpec`];
//! 3. the [`WorkerManager`] runs the tool in a fresh JVM and reads back an
//!    [`AnalysisResult`];
//! 4. the [`ResultEvaluator`] turns the result into a pass, a warning or a
//!    build failure.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): value types, errors and ports
//! - **Service Layer** (`services`): pure pipeline logic
//! - **Application Layer** (`application`): worker lifecycle and the pipeline
//! - **Adapters** (`adapters`): the `java` launcher
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use bugsweep::adapters::java::JavaWorkerProcessFactory;
//! use bugsweep::application::AnalysisPipeline;
//! use tokio_util::sync::CancellationToken;
//!
//! let factory = JavaWorkerProcessFactory::new("java", "edu.umd.cs.findbugs.FindBugs2");
//! let pipeline = AnalysisPipeline::new(factory, "/project", 17, CancellationToken::new());
//! let outcome = pipeline.execute(&inputs).await?;
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{AnalysisPipeline, WorkerManager};
pub use domain::errors::{
    AnalysisFailure, ClasspathError, PipelineError, PipelineResult, WorkerError,
};
pub use domain::models::{
    AnalysisInputs, AnalysisResult, Config, Effort, InvocationSpec, Outcome, ReportDescriptor,
    ReportFormat, ReportLevel, TaskOutcome,
};
pub use domain::ports::{
    FailurePolicy, ReportContainer, SourceProvider, WorkerLaunch, WorkerProcessFactory,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ClasspathValidator, InvocationSpecBuilder, ResultEvaluator};
