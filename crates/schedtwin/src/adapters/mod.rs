//! Adapters Layer - Connecting Drivers and Renderers to the Domain
//!
//! - Outbound: [`EngineSnapshot`], an owned view for renderers and JSON output
//! - Inbound: [`SharedEngine`], a lock-serialized handle for multi-task drivers

pub mod shared;
pub mod snapshot;

pub use shared::SharedEngine;
pub use snapshot::EngineSnapshot;
