//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use output::{exit_code, handle_error, output, CommandOutput};
pub use types::{AnalyzeArgs, Cli, Commands, OverrideArgs};
