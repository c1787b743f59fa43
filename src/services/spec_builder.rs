//! Fluent builder for [`InvocationSpec`].
//!
//! Every `with_*` call is a plain field assignment. Nothing is validated here;
//! the tool itself judges detector names, filter content and extra arguments.

use std::path::PathBuf;

use crate::domain::models::{Effort, InvocationSpec, ReportDescriptor, ReportLevel};

#[derive(Debug, Clone, Default)]
pub struct InvocationSpecBuilder {
    class_roots: Vec<PathBuf>,
    source_roots: Vec<PathBuf>,
    classpath: Vec<PathBuf>,
    plugin_classpath: Vec<PathBuf>,
    effort: Option<Effort>,
    report_level: Option<ReportLevel>,
    max_heap_size: Option<String>,
    visitors: Vec<String>,
    omit_visitors: Vec<String>,
    include_filter: Option<String>,
    exclude_filter: Option<String>,
    exclude_bugs_filter: Option<String>,
    extra_args: Vec<String>,
    jvm_args: Vec<String>,
    debug: bool,
    show_progress: bool,
    reports: Vec<ReportDescriptor>,
}

impl InvocationSpecBuilder {
    pub fn new(class_roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            class_roots: class_roots.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.source_roots = sources.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_classpath(mut self, classpath: impl IntoIterator<Item = PathBuf>) -> Self {
        self.classpath = classpath.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_plugins_list(mut self, plugins: impl IntoIterator<Item = PathBuf>) -> Self {
        self.plugin_classpath = plugins.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_effort(mut self, effort: Option<Effort>) -> Self {
        self.effort = effort;
        self
    }

    #[must_use]
    pub const fn with_report_level(mut self, report_level: Option<ReportLevel>) -> Self {
        self.report_level = report_level;
        self
    }

    #[must_use]
    pub fn with_max_heap_size(mut self, max_heap_size: Option<String>) -> Self {
        self.max_heap_size = max_heap_size;
        self
    }

    #[must_use]
    pub fn with_visitors(mut self, visitors: impl IntoIterator<Item = String>) -> Self {
        self.visitors = visitors.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_omit_visitors(mut self, omit_visitors: impl IntoIterator<Item = String>) -> Self {
        self.omit_visitors = omit_visitors.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_include_filter(mut self, filter: Option<String>) -> Self {
        self.include_filter = filter;
        self
    }

    #[must_use]
    pub fn with_exclude_filter(mut self, filter: Option<String>) -> Self {
        self.exclude_filter = filter;
        self
    }

    #[must_use]
    pub fn with_exclude_bugs_filter(mut self, filter: Option<String>) -> Self {
        self.exclude_bugs_filter = filter;
        self
    }

    #[must_use]
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args = args.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_jvm_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.jvm_args = args.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_debugging(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reports are folded in unchanged, order included.
    #[must_use]
    pub fn configure_reports(mut self, reports: impl IntoIterator<Item = ReportDescriptor>) -> Self {
        self.reports = reports.into_iter().collect();
        self
    }

    pub fn build(self) -> InvocationSpec {
        InvocationSpec {
            class_roots: self.class_roots,
            source_roots: self.source_roots,
            classpath: self.classpath,
            plugin_classpath: self.plugin_classpath,
            effort: self.effort,
            report_level: self.report_level,
            max_heap_size: self.max_heap_size,
            visitors: self.visitors,
            omit_visitors: self.omit_visitors,
            include_filter: self.include_filter,
            exclude_filter: self.exclude_filter,
            exclude_bugs_filter: self.exclude_bugs_filter,
            extra_args: self.extra_args,
            jvm_args: self.jvm_args,
            debug: self.debug,
            show_progress: self.show_progress,
            reports: self.reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ReportFormat;
    use proptest::prelude::*;

    fn full_builder() -> InvocationSpecBuilder {
        InvocationSpecBuilder::new(vec![PathBuf::from("/build/classes")])
            .with_sources(vec![PathBuf::from("/src/main/java")])
            .with_classpath(vec![PathBuf::from("/libs/guava.jar")])
            .with_plugins_list(vec![PathBuf::from("/plugins/fb-contrib.jar")])
            .with_effort(Some(Effort::Max))
            .with_report_level(Some(ReportLevel::Low))
            .with_max_heap_size(Some("1g".to_string()))
            .with_visitors(vec!["FindSqlInjection".to_string()])
            .with_omit_visitors(vec!["FindDeadLocalStores".to_string()])
            .with_include_filter(Some("<FindBugsFilter/>".to_string()))
            .with_exclude_filter(None)
            .with_exclude_bugs_filter(Some("<BugCollection/>".to_string()))
            .with_extra_args(vec!["-nested:false".to_string()])
            .with_jvm_args(vec!["-Duser.language=en".to_string()])
            .with_debugging(true)
            .with_show_progress(true)
            .configure_reports(vec![
                ReportDescriptor::disabled(ReportFormat::Xml, "/reports/main.xml"),
                ReportDescriptor::enabled(ReportFormat::Html, "/reports/main.html"),
            ])
    }

    #[test]
    fn test_build_copies_every_field() {
        let spec = full_builder().build();

        assert_eq!(spec.class_roots(), [PathBuf::from("/build/classes")]);
        assert_eq!(spec.source_roots(), [PathBuf::from("/src/main/java")]);
        assert_eq!(spec.classpath(), [PathBuf::from("/libs/guava.jar")]);
        assert_eq!(spec.plugin_classpath(), [PathBuf::from("/plugins/fb-contrib.jar")]);
        assert_eq!(spec.effort(), Some(Effort::Max));
        assert_eq!(spec.report_level(), Some(ReportLevel::Low));
        assert_eq!(spec.max_heap_size(), Some("1g"));
        assert_eq!(spec.visitors(), ["FindSqlInjection"]);
        assert_eq!(spec.omit_visitors(), ["FindDeadLocalStores"]);
        assert_eq!(spec.include_filter(), Some("<FindBugsFilter/>"));
        assert_eq!(spec.exclude_filter(), None);
        assert_eq!(spec.exclude_bugs_filter(), Some("<BugCollection/>"));
        assert_eq!(spec.extra_args(), ["-nested:false"]);
        assert_eq!(spec.jvm_args(), ["-Duser.language=en"]);
        assert!(spec.debug());
        assert!(spec.show_progress());
        assert_eq!(spec.reports().len(), 2);
        assert_eq!(spec.reports()[1].format, ReportFormat::Html);
    }

    #[test]
    fn test_setter_order_does_not_matter() {
        let forward = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .with_effort(Some(Effort::Min))
            .with_show_progress(true)
            .with_visitors(vec!["A".to_string()])
            .build();
        let reversed = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .with_visitors(vec!["A".to_string()])
            .with_show_progress(true)
            .with_effort(Some(Effort::Min))
            .build();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_nothing_configured_is_valid() {
        let spec = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")]).build();

        assert!(spec.visitors().is_empty());
        assert!(spec.include_filter().is_none());
        assert!(spec.reports().is_empty());
        assert!(!spec.debug());
    }

    proptest! {
        #[test]
        fn prop_build_is_deterministic(
            roots in proptest::collection::vec("[a-z/]{1,12}", 1..4),
            visitors in proptest::collection::vec("[A-Za-z]{1,10}", 0..4),
            heap in proptest::option::of("[0-9]{1,4}[mg]"),
            filter in proptest::option::of(".{0,40}"),
            debug in any::<bool>(),
        ) {
            let build = || {
                InvocationSpecBuilder::new(roots.iter().map(PathBuf::from))
                    .with_visitors(visitors.clone())
                    .with_max_heap_size(heap.clone())
                    .with_include_filter(filter.clone())
                    .with_debugging(debug)
                    .build()
            };

            prop_assert_eq!(build(), build());
        }
    }
}
