//! Process set module.
//!
//! This module turns declared process types into launch processes,
//! choosing the default process and splitting command lines for
//! direct execution.

pub mod builder;
pub mod types;

// Re-export commonly used items for convenience
pub use builder::{build, select_default, WEB_PROCESS_TYPE};
pub use types::{ExecutionMode, ProcessDescriptor, ProcessTypeMap};
