pub mod analysis_pipeline;
pub mod worker_arguments;
pub mod worker_manager;
pub mod worker_summary;

pub use analysis_pipeline::{has_class_files, AnalysisPipeline};
pub use worker_arguments::{join_classpath, launch, FilterFiles};
pub use worker_manager::WorkerManager;
pub use worker_summary::WorkerSummary;
