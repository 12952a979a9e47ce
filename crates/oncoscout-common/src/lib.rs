//! oncoscout-common — Shared errors, configuration, and HTTP plumbing used across all Oncoscout crates.

pub mod config;
pub mod error;
pub mod gene;
pub mod sandbox;

// Re-export commonly used types
pub use config::{AnnotateConfig, ScreenConfig};
