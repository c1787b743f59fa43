use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use regex::Regex;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::ReportFormat;

pub const CONFIG_FILE: &str = "bugsweep.yaml";
pub const LOCAL_CONFIG_FILE: &str = "bugsweep.local.yaml";
pub const ENV_PREFIX: &str = "BUGSWEEP_";

static HEAP_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[kKmMgG]?$").expect("heap size pattern is valid"));

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("analysis.tool_classpath is empty. It must list the analysis tool jars")]
    EmptyToolClasspath,

    #[error("Invalid max_heap_size: {0}. Expected a number with an optional k, m or g suffix")]
    InvalidMaxHeapSize(String),

    #[error("Report format {0} is configured more than once")]
    DuplicateReportFormat(ReportFormat),

    #[error("tool.main_class cannot be empty")]
    EmptyMainClass,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Failed to resolve working directory {}: {source}", path.display())]
    WorkingDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read filter file {}: {source}", path.display())]
    FilterRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. bugsweep.yaml in the current directory
    /// 3. bugsweep.local.yaml (local overrides, optional)
    /// 4. Environment variables (BUGSWEEP_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let analysis = &config.analysis;

        if analysis.tool_classpath.is_empty() {
            return Err(ConfigError::EmptyToolClasspath);
        }

        if let Some(heap) = &analysis.max_heap_size {
            if !HEAP_SIZE.is_match(heap) {
                return Err(ConfigError::InvalidMaxHeapSize(heap.clone()));
            }
        }

        let mut formats = HashSet::new();
        for report in &analysis.reports {
            if !formats.insert(report.format) {
                return Err(ConfigError::DuplicateReportFormat(report.format));
            }
        }

        if config.tool.main_class.trim().is_empty() {
            return Err(ConfigError::EmptyMainClass);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
