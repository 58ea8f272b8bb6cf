//! Infrastructure Layer - Files and Serialization
//!
//! # Responsibilities
//! - Scenario files (JSON via `serde_json`)
//! - Built-in preset workloads

pub mod scenario;

pub use scenario::Scenario;
