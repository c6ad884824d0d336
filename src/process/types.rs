//! Process type definitions.
//!
//! This file contains the types shared by the process set builder and the
//! launch metadata it feeds: the process type map, the execution mode and
//! the process descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from process type name to its raw command line.
///
/// Ordered by type name so iteration, and therefore emission order, is
/// reproducible.
pub type ProcessTypeMap = BTreeMap<String, String>;

/// How a process is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Command line is handed to a shell
    #[default]
    Shell,
    /// Command line is pre-split and executed without a shell
    Direct,
}

impl ExecutionMode {
    /// Get the string representation of the execution mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Shell => "shell",
            ExecutionMode::Direct => "direct",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified launch process.
///
/// Serializes in the `[[processes]]` layout of a buildpack `launch.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Process type name, e.g. `web` or `worker`
    #[serde(rename = "type")]
    pub process_type: String,
    /// Executable in direct mode, the whole command line in shell mode
    pub command: String,
    /// Literal arguments; present (possibly empty) only for direct processes
    #[serde(rename = "args", default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
    /// Whether the process is launched without a shell
    #[serde(default)]
    pub direct: bool,
    /// Whether this is the process launched when none is named
    #[serde(default)]
    pub default: bool,
}

impl ProcessDescriptor {
    /// Arguments as a slice, empty for shell processes
    pub fn args(&self) -> &[String] {
        self.arguments.as_deref().unwrap_or_default()
    }
}
