//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation
//! - Resolution into immutable analysis inputs

pub mod loader;
pub mod resolve;

pub use loader::{ConfigError, ConfigLoader};
pub use resolve::{resolve, working_dir};
