//! Worker process factory backed by the `java` launcher.

use std::path::PathBuf;

use tokio::process::Command;

use crate::application::join_classpath;
use crate::domain::errors::WorkerError;
use crate::domain::ports::{WorkerLaunch, WorkerProcessFactory};

/// Launches `java <vm options> -cp <classpath> <main class> <tool args>`.
#[derive(Debug, Clone)]
pub struct JavaWorkerProcessFactory {
    executable: PathBuf,
    main_class: String,
}

impl JavaWorkerProcessFactory {
    pub fn new(executable: impl Into<PathBuf>, main_class: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            main_class: main_class.into(),
        }
    }

    /// Full argument list handed to the launcher.
    pub fn arguments(&self, launch: &WorkerLaunch) -> Result<Vec<String>, WorkerError> {
        let mut args = launch.jvm_args.clone();
        if !launch.classpath.is_empty() {
            args.push("-cp".to_string());
            args.push(join_classpath(&launch.classpath)?);
        }
        args.push(self.main_class.clone());
        args.extend(launch.tool_args.iter().cloned());
        Ok(args)
    }
}

impl WorkerProcessFactory for JavaWorkerProcessFactory {
    fn command(&self, launch: &WorkerLaunch) -> Result<Command, WorkerError> {
        let mut command = Command::new(&self.executable);
        command.args(self.arguments(launch)?);
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> WorkerLaunch {
        WorkerLaunch {
            working_dir: PathBuf::from("/project"),
            classpath: vec![
                PathBuf::from("/tool/spotbugs-4.8.3.jar"),
                PathBuf::from("/plugins/findsecbugs.jar"),
            ],
            jvm_args: vec!["-Xmx1g".to_string()],
            tool_args: vec!["-exitcode".to_string(), "/project/classes".to_string()],
        }
    }

    #[test]
    fn test_argument_layout() {
        let factory = JavaWorkerProcessFactory::new("java", "edu.umd.cs.findbugs.FindBugs2");
        let args = factory.arguments(&launch()).unwrap();

        #[cfg(unix)]
        assert_eq!(
            args,
            vec![
                "-Xmx1g",
                "-cp",
                "/tool/spotbugs-4.8.3.jar:/plugins/findsecbugs.jar",
                "edu.umd.cs.findbugs.FindBugs2",
                "-exitcode",
                "/project/classes",
            ]
        );
        assert_eq!(args.len(), 6);
    }

    #[test]
    fn test_empty_classpath_omits_option() {
        let factory = JavaWorkerProcessFactory::new("java", "Main");
        let launch = WorkerLaunch {
            classpath: vec![],
            jvm_args: vec![],
            ..launch()
        };

        let args = factory.arguments(&launch).unwrap();
        assert_eq!(args, vec!["Main", "-exitcode", "/project/classes"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unjoinable_classpath_rejected() {
        let factory = JavaWorkerProcessFactory::new("java", "Main");
        let launch = WorkerLaunch {
            classpath: vec![PathBuf::from("/odd:dir/spotbugs.jar")],
            ..launch()
        };

        assert!(matches!(
            factory.command(&launch),
            Err(WorkerError::InvalidClasspath(_))
        ));
    }

    #[test]
    fn test_command_program() {
        let factory = JavaWorkerProcessFactory::new("/opt/jdk/bin/java", "Main");
        let command = factory.command(&launch()).unwrap();
        assert_eq!(command.as_std().get_program(), "/opt/jdk/bin/java");
    }
}
