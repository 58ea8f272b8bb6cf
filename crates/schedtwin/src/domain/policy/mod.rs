//! Policy Module - Algorithm Tag and Selector
//!
//! ```text
//! domain/policy/
//! ├── types.rs     Algorithm (closed enum)
//! ├── selector.rs  select_next, should_preempt
//! └── mod.rs       This file
//! ```

pub mod selector;
pub mod types;

pub use selector::{select_next, should_preempt};
pub use types::Algorithm;
