pub mod config;
pub mod inputs;
pub mod invocation;
pub mod report;
pub mod result;

pub use config::{
    AnalysisConfig, Config, JavaConfig, LoggingConfig, ReportConfig, TextResource, ToolConfig,
};
pub use inputs::AnalysisInputs;
pub use invocation::{Effort, InvocationSpec, ReportLevel};
pub use report::{first_enabled, ReportDescriptor, ReportFormat};
pub use result::{AnalysisResult, Outcome, TaskOutcome};
