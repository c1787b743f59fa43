//! Adapters for external systems.

pub mod java;
