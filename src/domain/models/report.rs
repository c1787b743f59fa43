//! Report descriptors.
//!
//! bugsweep never reads or writes report content. A descriptor only tells the
//! worker where the tool should put a report of a given format.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Xml,
    Html,
    Text,
    Emacs,
    Sarif,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Text => "text",
            Self::Emacs => "emacs",
            Self::Sarif => "sarif",
        }
    }

    /// File extension used for default destinations.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Text => "txt",
            Self::Emacs => "emacs",
            Self::Sarif => "sarif",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One possible output report: `(format, enabled, destination)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportDescriptor {
    pub format: ReportFormat,
    pub enabled: bool,
    pub destination: PathBuf,
}

impl ReportDescriptor {
    pub fn new(format: ReportFormat, enabled: bool, destination: impl Into<PathBuf>) -> Self {
        Self {
            format,
            enabled,
            destination: destination.into(),
        }
    }

    pub fn enabled(format: ReportFormat, destination: impl Into<PathBuf>) -> Self {
        Self::new(format, true, destination)
    }

    pub fn disabled(format: ReportFormat, destination: impl Into<PathBuf>) -> Self {
        Self::new(format, false, destination)
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// First descriptor with `enabled == true`, in declared order.
pub fn first_enabled(reports: &[ReportDescriptor]) -> Option<&ReportDescriptor> {
    reports.iter().find(|report| report.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_enabled_follows_declared_order() {
        let reports = vec![
            ReportDescriptor::disabled(ReportFormat::Xml, "build/main.xml"),
            ReportDescriptor::enabled(ReportFormat::Html, "build/main.html"),
            ReportDescriptor::enabled(ReportFormat::Text, "build/main.txt"),
        ];

        let chosen = first_enabled(&reports).unwrap();
        assert_eq!(chosen.format, ReportFormat::Html);
    }

    #[test]
    fn test_first_enabled_none_when_all_disabled() {
        let reports = vec![
            ReportDescriptor::disabled(ReportFormat::Xml, "build/main.xml"),
            ReportDescriptor::disabled(ReportFormat::Html, "build/main.html"),
        ];

        assert!(first_enabled(&reports).is_none());
        assert!(first_enabled(&[]).is_none());
    }

    #[test]
    fn test_reordering_changes_choice() {
        let reports = vec![
            ReportDescriptor::enabled(ReportFormat::Text, "build/main.txt"),
            ReportDescriptor::enabled(ReportFormat::Html, "build/main.html"),
        ];

        assert_eq!(first_enabled(&reports).unwrap().format, ReportFormat::Text);
    }
}
