//! Pre-flight compatibility check between the tool classpath and the JVM.
//!
//! A tool build that needs a newer (or older) Java than the one running the
//! worker fails deep inside the JVM with an unhelpful class-version error.
//! Inferring the tool version from the jar names lets us fail before spawning.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::domain::errors::ClasspathError;

/// `findbugs-3.0.1.jar`, `spotbugs-4.8.3.jar`, `spotbugs-4.9.0-SNAPSHOT.jar`.
/// Companion jars (`spotbugs-annotations-…`) do not match: the version must
/// follow the tool name directly.
static TOOL_JAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(findbugs|spotbugs)-((\d+)(?:\.(\d+))?[0-9A-Za-z.+\-]*)\.jar$")
        .expect("tool jar pattern is valid")
});

/// Tool families recognised on the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolFamily {
    FindBugs,
    SpotBugs,
}

impl ToolFamily {
    const fn display_name(self) -> &'static str {
        match self {
            Self::FindBugs => "FindBugs",
            Self::SpotBugs => "SpotBugs",
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Tool version inferred from a classpath file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolVersion {
    pub family: ToolFamily,
    pub version: String,
    pub major: u32,
    pub minor: u32,
    pub file: String,
}

impl ToolVersion {
    /// Parse a single classpath file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let captures = TOOL_JAR.captures(file_name)?;
        let family = match &captures[1] {
            "findbugs" => ToolFamily::FindBugs,
            _ => ToolFamily::SpotBugs,
        };
        let major = captures[3].parse().ok()?;
        let minor = captures
            .get(4)
            .map_or(Some(0), |m| m.as_str().parse().ok())?;

        Some(Self {
            family,
            version: captures[2].to_string(),
            major,
            minor,
            file: file_name.to_string(),
        })
    }

    fn too_new(&self, required: u32, actual: u32) -> ClasspathError {
        ClasspathError::ToolTooNew {
            tool: self.family.to_string(),
            file: self.file.clone(),
            version: self.version.clone(),
            required,
            actual,
        }
    }

    fn too_old(&self, supported: u32, actual: u32) -> ClasspathError {
        ClasspathError::ToolTooOld {
            tool: self.family.to_string(),
            file: self.file.clone(),
            version: self.version.clone(),
            supported,
            actual,
        }
    }
}

/// Checks the tool classpath against the running Java major version.
#[derive(Debug, Clone, Copy)]
pub struct ClasspathValidator {
    java_version: u32,
}

impl ClasspathValidator {
    pub const fn new(java_version: u32) -> Self {
        Self { java_version }
    }

    pub const fn java_version(&self) -> u32 {
        self.java_version
    }

    /// Validate classpath file names (not paths).
    ///
    /// The first entry naming a tool jar decides the version; all other
    /// entries are ignored.
    pub fn validate<I, S>(&self, file_names: I) -> Result<ToolVersion, ClasspathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inspected = Vec::new();
        let mut found = None;
        for name in file_names {
            let name = name.as_ref();
            if found.is_none() {
                found = ToolVersion::from_file_name(name);
            }
            inspected.push(name.to_string());
        }

        let Some(tool) = found else {
            return Err(ClasspathError::UnknownToolVersion(inspected));
        };

        debug!(
            tool = %tool.family,
            version = %tool.version,
            java_version = self.java_version,
            "inferred analysis tool version from classpath"
        );

        self.check(&tool)?;
        Ok(tool)
    }

    fn check(&self, tool: &ToolVersion) -> Result<(), ClasspathError> {
        let java = self.java_version;
        match tool.family {
            ToolFamily::FindBugs if tool.major >= 3 && java < 7 => Err(tool.too_new(7, java)),
            ToolFamily::FindBugs if tool.major < 3 && java > 7 => Err(tool.too_old(7, java)),
            ToolFamily::SpotBugs if (tool.major, tool.minor) >= (4, 9) && java < 11 => {
                Err(tool.too_new(11, java))
            }
            ToolFamily::SpotBugs if java < 8 => Err(tool.too_new(8, java)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_jar_names() {
        let findbugs = ToolVersion::from_file_name("findbugs-3.0.1.jar").unwrap();
        assert_eq!(findbugs.family, ToolFamily::FindBugs);
        assert_eq!(findbugs.version, "3.0.1");
        assert_eq!((findbugs.major, findbugs.minor), (3, 0));

        let spotbugs = ToolVersion::from_file_name("spotbugs-4.9.0-SNAPSHOT.jar").unwrap();
        assert_eq!(spotbugs.family, ToolFamily::SpotBugs);
        assert_eq!((spotbugs.major, spotbugs.minor), (4, 9));
    }

    #[test]
    fn test_companion_jars_do_not_match() {
        assert!(ToolVersion::from_file_name("spotbugs-annotations-4.8.3.jar").is_none());
        assert!(ToolVersion::from_file_name("findbugs-ant-3.0.1.jar").is_none());
        assert!(ToolVersion::from_file_name("bcel-6.0.jar").is_none());
        assert!(ToolVersion::from_file_name("findbugs-3.0.1.zip").is_none());
    }

    #[test]
    fn test_findbugs_3_needs_java_7() {
        let err = ClasspathValidator::new(6)
            .validate(["findbugs-3.0.1.jar"])
            .unwrap_err();

        assert!(matches!(
            err,
            ClasspathError::ToolTooNew {
                required: 7,
                actual: 6,
                ..
            }
        ));
        assert_eq!(err.offending_file(), Some("findbugs-3.0.1.jar"));
        assert!(err.to_string().contains("too high"));
    }

    #[test]
    fn test_findbugs_2_rejected_on_java_8() {
        let err = ClasspathValidator::new(8)
            .validate(["findbugs-2.0.3.jar"])
            .unwrap_err();

        assert!(matches!(
            err,
            ClasspathError::ToolTooOld {
                supported: 7,
                actual: 8,
                ..
            }
        ));
        assert!(err.to_string().contains("too low"));
    }

    #[test]
    fn test_compatible_combinations() {
        assert!(ClasspathValidator::new(7).validate(["findbugs-3.0.1.jar"]).is_ok());
        assert!(ClasspathValidator::new(7).validate(["findbugs-2.0.3.jar"]).is_ok());
        assert!(ClasspathValidator::new(8).validate(["spotbugs-4.8.3.jar"]).is_ok());
        assert!(ClasspathValidator::new(17).validate(["spotbugs-4.9.1.jar"]).is_ok());
    }

    #[test]
    fn test_spotbugs_4_9_needs_java_11() {
        let err = ClasspathValidator::new(8)
            .validate(["spotbugs-4.9.1.jar"])
            .unwrap_err();

        assert!(matches!(err, ClasspathError::ToolTooNew { required: 11, .. }));
    }

    #[test]
    fn test_verdict_independent_of_other_entries() {
        let validator = ClasspathValidator::new(8);
        let alone = validator.validate(["findbugs-2.0.3.jar"]).unwrap_err();
        let surrounded = validator
            .validate([
                "asm-5.0.jar",
                "findbugs-2.0.3.jar",
                "bcel-6.0.jar",
                "jsr305-3.0.2.jar",
            ])
            .unwrap_err();

        assert_eq!(alone, surrounded);
    }

    #[test]
    fn test_unknown_tool_version_lists_classpath() {
        let err = ClasspathValidator::new(17)
            .validate(["asm-9.0.jar", "bcel-6.0.jar"])
            .unwrap_err();

        assert_eq!(
            err,
            ClasspathError::UnknownToolVersion(vec![
                "asm-9.0.jar".to_string(),
                "bcel-6.0.jar".to_string()
            ])
        );
        assert!(err.to_string().contains("asm-9.0.jar, bcel-6.0.jar"));
    }
}
