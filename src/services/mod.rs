//! Pure pipeline logic: classpath validation, spec assembly and result
//! evaluation. Nothing in here spawns processes or touches the filesystem.

pub mod classpath_validator;
pub mod result_evaluator;
pub mod spec_builder;

pub use classpath_validator::{ClasspathValidator, ToolFamily, ToolVersion};
pub use result_evaluator::{clickable_file_url, ResultEvaluator};
pub use spec_builder::InvocationSpecBuilder;
