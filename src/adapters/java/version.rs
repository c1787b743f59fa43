//! Java version detection from `java -version`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"version "(\d+)(?:\.(\d+))?"#).expect("java version pattern is valid")
});

#[derive(Debug, Error)]
pub enum JavaVersionError {
    #[error("Failed to run {} -version: {source}", executable.display())]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read the Java version from: {0}")]
    Unrecognized(String),
}

/// Major Java version of a `-version` banner.
///
/// Pre-9 releases report `1.N`; those map to `N`.
pub fn parse_java_version(banner: &str) -> Option<u32> {
    let captures = VERSION_LINE.captures(banner)?;
    let major: u32 = captures[1].parse().ok()?;
    if major == 1 {
        return captures.get(2)?.as_str().parse().ok();
    }
    Some(major)
}

/// Ask `executable` for its version.
pub async fn detect_java_version(executable: &Path) -> Result<u32, JavaVersionError> {
    let output = Command::new(executable)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| JavaVersionError::Launch {
            executable: executable.to_path_buf(),
            source,
        })?;

    // The banner goes to stderr, but some launchers use stdout.
    let banner = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    debug!(banner = %banner.trim(), "java -version");

    parse_java_version(&banner).ok_or_else(|| {
        JavaVersionError::Unrecognized(banner.lines().next().unwrap_or_default().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modern_versions() {
        assert_eq!(
            parse_java_version(r#"openjdk version "17.0.2" 2022-01-18"#),
            Some(17)
        );
        assert_eq!(parse_java_version(r#"openjdk version "21" 2023-09-19"#), Some(21));
        assert_eq!(parse_java_version(r#"java version "9-ea""#), Some(9));
    }

    #[test]
    fn test_parse_legacy_versions() {
        assert_eq!(parse_java_version(r#"java version "1.8.0_292""#), Some(8));
        assert_eq!(parse_java_version(r#"java version "1.7.0_80""#), Some(7));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_java_version("command not found"), None);
        assert_eq!(parse_java_version(""), None);
    }

    #[tokio::test]
    async fn test_missing_launcher() {
        let err = detect_java_version(Path::new("/nonexistent/bin/java"))
            .await
            .unwrap_err();
        assert!(matches!(err, JavaVersionError::Launch { .. }));
    }
}
