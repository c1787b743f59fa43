//! Domain layer for bugsweep
//!
//! Value types, errors and ports. No I/O happens here.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AnalysisFailure, ClasspathError, PipelineError, PipelineResult, WorkerError};
