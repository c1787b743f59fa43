//! Java launcher adapter.
//!
//! Starts analysis workers in a fresh JVM and detects the Java version the
//! launcher provides.

pub mod process_factory;
pub mod version;

pub use process_factory::JavaWorkerProcessFactory;
pub use version::{detect_java_version, parse_java_version, JavaVersionError};
