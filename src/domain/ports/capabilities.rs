//! Independent capabilities an analysis task is composed of.

use std::path::PathBuf;

use crate::domain::models::ReportDescriptor;

/// Supplies what gets analyzed.
pub trait SourceProvider {
    /// Class-file roots. The pipeline is skipped when these hold no files.
    fn class_roots(&self) -> &[PathBuf];

    fn source_roots(&self) -> &[PathBuf];
}

/// Holds the failure policy for findings.
pub trait FailurePolicy {
    /// Whether findings degrade to a warning instead of failing the build.
    fn ignore_failures(&self) -> bool;
}

/// Holds the report descriptors in declared priority order.
pub trait ReportContainer {
    fn reports(&self) -> &[ReportDescriptor];
}
