//! Failure policy applied to a worker result.
//!
//! This is the only place `ignore_failures` is consulted, and it only ever
//! softens findings. Worker failures and tool-internal errors stay fatal.

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::errors::AnalysisFailure;
use crate::domain::models::{first_enabled, AnalysisResult, Outcome, ReportDescriptor};

#[derive(Debug, Clone)]
pub struct ResultEvaluator {
    tool_name: String,
}

impl ResultEvaluator {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }

    /// Decide the verdict. First matching rule wins:
    /// captured failure, tool errors, findings, otherwise pass.
    pub fn evaluate(
        &self,
        result: AnalysisResult,
        ignore_failures: bool,
        reports: &[ReportDescriptor],
    ) -> Outcome {
        if let Some(failure) = result.failure {
            return Outcome::Fail(AnalysisFailure::with_cause(self.error_message(), failure));
        }

        if result.error_count > 0 {
            return Outcome::Fail(AnalysisFailure::new(self.error_message()));
        }

        if result.bug_count > 0 {
            let mut message = format!("{} rule violations were found.", self.tool_name);
            if let Some(report) = first_enabled(reports) {
                let _ = write!(
                    message,
                    " See the report at: {}",
                    clickable_file_url(report.destination())
                );
            }

            return if ignore_failures {
                Outcome::Warn(message)
            } else {
                Outcome::Fail(AnalysisFailure::new(message))
            };
        }

        Outcome::Pass
    }

    fn error_message(&self) -> String {
        format!(
            "{} encountered an error. Run with --debug to get more information.",
            self.tool_name
        )
    }
}

/// `file://` URL for a report destination, suitable for terminals that
/// linkify URLs.
pub fn clickable_file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let raw = absolute.to_string_lossy().replace('\\', "/");

    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        url.push('/');
    }
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                url.push(char::from(byte));
            }
            _ => {
                let _ = write!(url, "%{byte:02X}");
            }
        }
    }
    url
}
