//! Stack classification.
//!
//! The run image a buildpack targets decides whether a shell is available at
//! launch time. The tiny stack ships without one, so its processes have to be
//! executed directly.

use crate::process::ExecutionMode;

/// Stack identifier of the shell-less tiny stack
pub const TINY_STACK_ID: &str = "io.paketo.stacks.tiny";

impl ExecutionMode {
    /// Classify a stack identifier.
    ///
    /// Only [`TINY_STACK_ID`] selects direct execution; every other value,
    /// including an empty one, selects the shell.
    pub fn from_stack_id(stack_id: &str) -> Self {
        if stack_id == TINY_STACK_ID {
            ExecutionMode::Direct
        } else {
            ExecutionMode::Shell
        }
    }
}
