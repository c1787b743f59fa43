use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::invocation::{Effort, ReportLevel};
use super::report::ReportFormat;

/// Main configuration structure for bugsweep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directory the worker runs in; relative paths resolve against it
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// What to analyze and how
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Analysis tool entry point
    #[serde(default)]
    pub tool: ToolConfig,

    /// JVM used for the worker process
    #[serde(default)]
    pub java: JavaConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            analysis: AnalysisConfig::default(),
            tool: ToolConfig::default(),
            java: JavaConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Text handed to the tool as a filter, either inline or read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextResource {
    File(PathBuf),
    Text(String),
}

/// Analysis inputs, as written in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Class directories to analyze
    #[serde(default)]
    pub classes: Vec<PathBuf>,

    /// Source roots, used by the tool to annotate findings
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Compile classpath: used during analysis, not analyzed itself
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Classpath holding the analysis tool
    #[serde(default)]
    pub tool_classpath: Vec<PathBuf>,

    /// Classpath holding additional tool plugins
    #[serde(default)]
    pub plugin_classpath: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<Effort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_level: Option<ReportLevel>,

    /// Maximum heap size for the worker JVM, e.g. `1g`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heap_size: Option<String>,

    /// Detectors to run, by unqualified class name
    #[serde(default)]
    pub visitors: Vec<String>,

    /// Detectors not to run
    #[serde(default)]
    pub omit_visitors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_filter: Option<TextResource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_filter: Option<TextResource>,

    /// Baseline of known bugs to exclude from reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_bugs_filter: Option<TextResource>,

    /// Tool arguments passed through verbatim
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// JVM arguments passed through verbatim
    #[serde(default)]
    pub jvm_args: Vec<String>,

    #[serde(default)]
    pub show_progress: bool,

    /// Let the build continue when findings are reported
    #[serde(default)]
    pub ignore_failures: bool,

    /// Reports, in priority order
    #[serde(default = "default_reports")]
    pub reports: Vec<ReportConfig>,

    /// Directory for reports without an explicit destination
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            classes: vec![],
            sources: vec![],
            classpath: vec![],
            tool_classpath: vec![],
            plugin_classpath: vec![],
            effort: None,
            report_level: None,
            max_heap_size: None,
            visitors: vec![],
            omit_visitors: vec![],
            include_filter: None,
            exclude_filter: None,
            exclude_bugs_filter: None,
            extra_args: vec![],
            jvm_args: vec![],
            show_progress: false,
            ignore_failures: false,
            reports: default_reports(),
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_reports() -> Vec<ReportConfig> {
    vec![ReportConfig {
        format: ReportFormat::Xml,
        enabled: true,
        destination: None,
    }]
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("build/reports/bugsweep")
}

/// One configured report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    pub format: ReportFormat,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
}

const fn default_true() -> bool {
    true
}

/// Analysis tool entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolConfig {
    /// Name used in messages. Inferred from the tool jar when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Main class started in the worker JVM
    #[serde(default = "default_main_class")]
    pub main_class: String,
}

fn default_main_class() -> String {
    "edu.umd.cs.findbugs.FindBugs2".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: None,
            main_class: default_main_class(),
        }
    }
}

/// JVM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JavaConfig {
    /// `java` launcher
    #[serde(default = "default_java_executable")]
    pub executable: PathBuf,

    /// Java major version; detected from the launcher when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Seconds between asking a cancelled worker to stop and killing it
    #[serde(default = "default_termination_grace_secs")]
    pub termination_grace_secs: u64,
}

fn default_java_executable() -> PathBuf {
    PathBuf::from("java")
}

const fn default_termination_grace_secs() -> u64 {
    5
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            executable: default_java_executable(),
            version: None,
            termination_grace_secs: default_termination_grace_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; logs go to stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
