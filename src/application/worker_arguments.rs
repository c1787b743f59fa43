//! Renders an [`InvocationSpec`] into worker VM options and tool arguments.

use std::env::{self, JoinPathsError};
use std::path::{Path, PathBuf};

use crate::domain::errors::WorkerError;
use crate::domain::models::{InvocationSpec, ReportDescriptor, ReportFormat};
use crate::domain::ports::WorkerLaunch;

const INCLUDE_FILTER_FILE: &str = "include-filter.xml";
const EXCLUDE_FILTER_FILE: &str = "exclude-filter.xml";
const EXCLUDE_BUGS_FILTER_FILE: &str = "exclude-bugs-filter.xml";

/// Filter files materialized from the filter text in a spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFiles {
    pub include: Option<PathBuf>,
    pub exclude: Option<PathBuf>,
    pub exclude_bugs: Option<PathBuf>,
}

impl FilterFiles {
    /// Where the filters of `spec` go inside `dir`, without writing them.
    pub fn planned(spec: &InvocationSpec, dir: &Path) -> Self {
        Self {
            include: spec.include_filter().map(|_| dir.join(INCLUDE_FILTER_FILE)),
            exclude: spec.exclude_filter().map(|_| dir.join(EXCLUDE_FILTER_FILE)),
            exclude_bugs: spec
                .exclude_bugs_filter()
                .map(|_| dir.join(EXCLUDE_BUGS_FILTER_FILE)),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none() && self.exclude_bugs.is_none()
    }

    /// Write each present filter into `dir`.
    pub async fn write(spec: &InvocationSpec, dir: &Path) -> Result<Self, WorkerError> {
        let files = Self::planned(spec, dir);
        write_filter(files.include.as_deref(), spec.include_filter()).await?;
        write_filter(files.exclude.as_deref(), spec.exclude_filter()).await?;
        write_filter(files.exclude_bugs.as_deref(), spec.exclude_bugs_filter()).await?;
        Ok(files)
    }
}

async fn write_filter(path: Option<&Path>, text: Option<&str>) -> Result<(), WorkerError> {
    let (Some(path), Some(text)) = (path, text) else {
        return Ok(());
    };
    tokio::fs::write(path, text)
        .await
        .map_err(|source| WorkerError::Prepare {
            path: path.to_path_buf(),
            source,
        })
}

/// Everything the worker process factory needs for one run of `spec`.
///
/// The worker classpath is the tool classpath followed by the plugins.
pub fn launch(
    working_dir: &Path,
    tool_classpath: &[PathBuf],
    spec: &InvocationSpec,
    filters: &FilterFiles,
) -> Result<WorkerLaunch, WorkerError> {
    Ok(WorkerLaunch {
        working_dir: working_dir.to_path_buf(),
        classpath: tool_classpath
            .iter()
            .chain(spec.plugin_classpath())
            .cloned()
            .collect(),
        jvm_args: jvm_args(spec),
        tool_args: tool_args(spec, filters)?,
    })
}

/// Join classpath entries with the platform separator.
pub fn join_classpath(entries: &[PathBuf]) -> Result<String, JoinPathsError> {
    Ok(env::join_paths(entries)?.to_string_lossy().into_owned())
}

/// VM options: heap limit, user JVM arguments, then the tool debug switch.
pub fn jvm_args(spec: &InvocationSpec) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(heap) = spec.max_heap_size() {
        args.push(format!("-Xmx{heap}"));
    }
    args.extend(spec.jvm_args().iter().cloned());
    if spec.debug() {
        args.push("-Dfindbugs.debug=true".to_string());
    }
    args
}

fn report_option(report: &ReportDescriptor) -> String {
    let destination = report.destination().to_string_lossy();
    match report.format {
        ReportFormat::Xml => format!("-xml:withMessages={destination}"),
        ReportFormat::Html => format!("-html={destination}"),
        ReportFormat::Text => format!("-sortByClass={destination}"),
        ReportFormat::Emacs => format!("-emacs={destination}"),
        ReportFormat::Sarif => format!("-sarif={destination}"),
    }
}

/// Tool arguments in the order the tool's command line expects them.
///
/// `-exitcode` is always first: without it the tool exits 0 and the counts
/// cannot be read back. Class roots always come last, after extra arguments.
pub fn tool_args(spec: &InvocationSpec, filters: &FilterFiles) -> Result<Vec<String>, WorkerError> {
    let mut args = vec!["-exitcode".to_string()];

    if !spec.plugin_classpath().is_empty() {
        args.push("-pluginList".to_string());
        args.push(join_classpath(spec.plugin_classpath())?);
    }

    args.extend(
        spec.reports()
            .iter()
            .filter(|report| report.enabled)
            .map(report_option),
    );

    if !spec.source_roots().is_empty() {
        args.push("-sourcepath".to_string());
        args.push(join_classpath(spec.source_roots())?);
    }

    if !spec.classpath().is_empty() {
        args.push("-auxclasspath".to_string());
        args.push(join_classpath(spec.classpath())?);
    }

    if spec.show_progress() {
        args.push("-progress".to_string());
    }

    if let Some(effort) = spec.effort() {
        args.push(format!("-effort:{effort}"));
    }

    if let Some(level) = spec.report_level() {
        args.push(format!("-{level}"));
    }

    if !spec.visitors().is_empty() {
        args.push("-visitors".to_string());
        args.push(spec.visitors().join(","));
    }

    if !spec.omit_visitors().is_empty() {
        args.push("-omitVisitors".to_string());
        args.push(spec.omit_visitors().join(","));
    }

    let filter_options = [
        ("-include", &filters.include),
        ("-exclude", &filters.exclude),
        ("-excludeBugs", &filters.exclude_bugs),
    ];
    for (option, path) in filter_options {
        if let Some(path) = path {
            args.push(option.to_string());
            args.push(path.to_string_lossy().into_owned());
        }
    }

    args.extend(spec.extra_args().iter().cloned());
    args.extend(
        spec.class_roots()
            .iter()
            .map(|root| root.to_string_lossy().into_owned()),
    );

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Effort, ReportLevel};
    use crate::services::InvocationSpecBuilder;

    fn minimal_spec() -> InvocationSpec {
        InvocationSpecBuilder::new(vec![PathBuf::from("/build/classes")]).build()
    }

    #[test]
    fn test_minimal_arguments() {
        let args = tool_args(&minimal_spec(), &FilterFiles::default()).unwrap();
        assert_eq!(args, vec!["-exitcode", "/build/classes"]);
        assert!(jvm_args(&minimal_spec()).is_empty());
    }

    #[test]
    fn test_full_argument_order() {
        let spec = InvocationSpecBuilder::new(vec![
            PathBuf::from("/build/classes/main"),
            PathBuf::from("/build/classes/extra"),
        ])
        .with_plugins_list(vec![PathBuf::from("/plugins/fb-contrib.jar")])
        .with_sources(vec![PathBuf::from("/src/main/java")])
        .with_classpath(vec![PathBuf::from("/libs/guava.jar")])
        .with_show_progress(true)
        .with_effort(Some(Effort::Max))
        .with_report_level(Some(ReportLevel::High))
        .with_visitors(vec!["A".to_string(), "B".to_string()])
        .with_omit_visitors(vec!["C".to_string()])
        .with_extra_args(vec!["-nested:false".to_string()])
        .configure_reports(vec![
            ReportDescriptor::disabled(ReportFormat::Xml, "/reports/main.xml"),
            ReportDescriptor::enabled(ReportFormat::Html, "/reports/main.html"),
        ])
        .build();
        let filters = FilterFiles {
            include: Some(PathBuf::from("/tmp/include-filter.xml")),
            exclude: None,
            exclude_bugs: Some(PathBuf::from("/tmp/exclude-bugs-filter.xml")),
        };

        let args = tool_args(&spec, &filters).unwrap();

        assert_eq!(
            args,
            vec![
                "-exitcode",
                "-pluginList",
                "/plugins/fb-contrib.jar",
                "-html=/reports/main.html",
                "-sourcepath",
                "/src/main/java",
                "-auxclasspath",
                "/libs/guava.jar",
                "-progress",
                "-effort:max",
                "-high",
                "-visitors",
                "A,B",
                "-omitVisitors",
                "C",
                "-include",
                "/tmp/include-filter.xml",
                "-excludeBugs",
                "/tmp/exclude-bugs-filter.xml",
                "-nested:false",
                "/build/classes/main",
                "/build/classes/extra",
            ]
        );
    }

    #[test]
    fn test_every_enabled_report_is_passed() {
        let spec = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .configure_reports(vec![
                ReportDescriptor::enabled(ReportFormat::Xml, "/r/a.xml"),
                ReportDescriptor::enabled(ReportFormat::Text, "/r/a.txt"),
                ReportDescriptor::enabled(ReportFormat::Sarif, "/r/a.sarif"),
            ])
            .build();

        let args = tool_args(&spec, &FilterFiles::default()).unwrap();
        assert_eq!(
            &args[1..4],
            ["-xml:withMessages=/r/a.xml", "-sortByClass=/r/a.txt", "-sarif=/r/a.sarif"]
        );
    }

    #[test]
    fn test_jvm_args_order() {
        let spec = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .with_max_heap_size(Some("1g".to_string()))
            .with_jvm_args(vec!["-Duser.language=en".to_string()])
            .with_debugging(true)
            .build();

        assert_eq!(
            jvm_args(&spec),
            vec!["-Xmx1g", "-Duser.language=en", "-Dfindbugs.debug=true"]
        );
    }

    #[tokio::test]
    async fn test_filter_files_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .with_exclude_filter(Some("<FindBugsFilter/>".to_string()))
            .build();

        let filters = FilterFiles::write(&spec, dir.path()).await.unwrap();

        assert!(filters.include.is_none());
        assert!(filters.exclude_bugs.is_none());
        assert_eq!(filters, FilterFiles::planned(&spec, dir.path()));
        let exclude = filters.exclude.unwrap();
        assert_eq!(exclude, dir.path().join("exclude-filter.xml"));
        assert_eq!(std::fs::read_to_string(exclude).unwrap(), "<FindBugsFilter/>");
    }

    #[test]
    fn test_launch_classpath_order() {
        let spec = InvocationSpecBuilder::new(vec![PathBuf::from("/classes")])
            .with_plugins_list(vec![PathBuf::from("/plugins/extra.jar")])
            .with_max_heap_size(Some("256m".to_string()))
            .build();

        let launch = launch(
            Path::new("/project"),
            &[PathBuf::from("/tool/spotbugs-4.8.3.jar")],
            &spec,
            &FilterFiles::default(),
        )
        .unwrap();

        assert_eq!(launch.working_dir, PathBuf::from("/project"));
        assert_eq!(
            launch.classpath,
            vec![
                PathBuf::from("/tool/spotbugs-4.8.3.jar"),
                PathBuf::from("/plugins/extra.jar")
            ]
        );
        assert_eq!(launch.jvm_args, vec!["-Xmx256m"]);
        assert_eq!(launch.tool_args.last().map(String::as_str), Some("/classes"));
    }
}
