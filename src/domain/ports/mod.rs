//! Port trait definitions (Hexagonal Architecture)
//!
//! - `WorkerProcessFactory`: starts isolated analysis workers
//! - `SourceProvider`, `FailurePolicy`, `ReportContainer`: the capabilities
//!   an analysis task is composed of

pub mod capabilities;
pub mod worker_process;

pub use capabilities::{FailurePolicy, ReportContainer, SourceProvider};
pub use worker_process::{WorkerLaunch, WorkerProcessFactory};
