//! Reads analysis counts back from the worker's output.
//!
//! Run with `-exitcode`, the tool prints its totals and a closing
//! `Exit code set to: N` line on stderr, then exits with a bit set of
//! [`BUGS_FOUND_FLAG`], [`MISSING_CLASS_FLAG`] and [`ERROR_FLAG`].

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::errors::WorkerError;
use crate::domain::models::AnalysisResult;

pub const BUGS_FOUND_FLAG: i32 = 1;
pub const MISSING_CLASS_FLAG: i32 = 2;
pub const ERROR_FLAG: i32 = 4;
const ALL_FLAGS: i32 = BUGS_FOUND_FLAG | MISSING_CLASS_FLAG | ERROR_FLAG;

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(Warnings generated|Missing classes|Analysis errors|Exit code set to):\s*(\d+)")
        .expect("summary line pattern is valid")
});

/// Counts observed on the worker's output streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub bug_count: Option<u32>,
    pub missing_class_count: Option<u32>,
    pub error_count: Option<u32>,
    pub reported_exit_code: Option<i32>,
}

impl WorkerSummary {
    /// Record one output line. Unrelated lines are ignored.
    pub fn observe(&mut self, line: &str) {
        let Some(captures) = SUMMARY_LINE.captures(line) else {
            return;
        };
        let value = &captures[2];
        match &captures[1] {
            "Warnings generated" => self.bug_count = value.parse().ok(),
            "Missing classes" => self.missing_class_count = value.parse().ok(),
            "Analysis errors" => self.error_count = value.parse().ok(),
            _ => self.reported_exit_code = value.parse().ok(),
        }
    }

    /// Combine summaries of the two output streams.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            bug_count: self.bug_count.or(other.bug_count),
            missing_class_count: self.missing_class_count.or(other.missing_class_count),
            error_count: self.error_count.or(other.error_count),
            reported_exit_code: self.reported_exit_code.or(other.reported_exit_code),
        }
    }

    /// Turn the observed counts and the process exit code into a result.
    ///
    /// `exit_code` is `None` when the process died from a signal.
    pub fn into_result(self, exit_code: Option<i32>) -> AnalysisResult {
        let Some(code) = exit_code else {
            return AnalysisResult::failed(WorkerError::Crashed {
                status: "killed by signal".to_string(),
            });
        };

        // A non-zero exit is only a flag set when the tool said so itself;
        // a JVM that dies with an uncaught exception also exits 1.
        if code != 0 && (code & !ALL_FLAGS != 0 || self.reported_exit_code.is_none()) {
            return AnalysisResult::failed(WorkerError::Crashed {
                status: format!("exit code {code}"),
            });
        }

        let flagged = |flag: i32| u32::from(code & flag != 0);
        AnalysisResult::counts(
            self.bug_count.unwrap_or_else(|| flagged(BUGS_FOUND_FLAG)),
            self.error_count.unwrap_or_else(|| flagged(ERROR_FLAG)),
        )
        .with_missing_classes(
            self.missing_class_count
                .unwrap_or_else(|| flagged(MISSING_CLASS_FLAG)),
        )
    }
}
