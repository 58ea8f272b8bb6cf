//! Thread Module - Records and Lifecycle
//!
//! ```text
//! domain/thread/
//! ├── types.rs   ThreadId, ThreadState, Interval, Tick
//! ├── record.rs  ThreadSpec, ThreadRecord
//! └── mod.rs     This file
//! ```

pub mod record;
pub mod types;

pub use record::{ThreadRecord, ThreadSpec};
pub use types::{Interval, ThreadId, ThreadState, Tick};
