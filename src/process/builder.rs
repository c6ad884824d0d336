//! Process set construction.
//!
//! Turns a [`ProcessTypeMap`] into launch processes. Entries are emitted in
//! process type order. Exactly one process is marked default: `web` when it
//! is declared, otherwise the first emitted process.

use super::types::{ExecutionMode, ProcessDescriptor, ProcessTypeMap};
use crate::tokenizer::{tokenize, ParseError};

/// Process type that is always the default when declared
pub const WEB_PROCESS_TYPE: &str = "web";

/// Pick the default process among types listed in emission order.
///
/// Returns the index of the default, or `None` when there are no types.
pub fn select_default<S: AsRef<str>>(process_types: &[S]) -> Option<usize> {
    process_types
        .iter()
        .position(|t| t.as_ref() == WEB_PROCESS_TYPE)
        .or_else(|| (!process_types.is_empty()).then_some(0))
}

/// Build the launch processes for a set of process types.
///
/// In shell mode every command line is kept verbatim. In direct mode each
/// command line is tokenized, and the first malformed one fails the whole
/// build.
///
/// # Arguments
/// * `entries` - Process type to command line mapping
/// * `mode` - Execution mode for every produced process
///
/// # Examples
/// ```
/// use procfile::process::{build, ExecutionMode, ProcessTypeMap};
///
/// let mut entries = ProcessTypeMap::new();
/// entries.insert("worker".to_string(), "bin/worker --queue default".to_string());
/// entries.insert("web".to_string(), "bin/server".to_string());
///
/// let processes = build(&entries, ExecutionMode::Direct).unwrap();
/// assert_eq!(processes[0].process_type, "web");
/// assert!(processes[0].default);
/// assert_eq!(processes[1].args(), ["--queue", "default"]);
/// ```
pub fn build(
    entries: &ProcessTypeMap,
    mode: ExecutionMode,
) -> Result<Vec<ProcessDescriptor>, ParseError> {
    let process_types: Vec<&str> = entries.keys().map(String::as_str).collect();
    let default_index = select_default(&process_types);

    entries
        .iter()
        .enumerate()
        .map(|(index, (process_type, command_line))| {
            let default = default_index == Some(index);
            match mode {
                ExecutionMode::Shell => Ok(shell_process(process_type, command_line, default)),
                ExecutionMode::Direct => direct_process(process_type, command_line, default),
            }
        })
        .collect()
}

fn shell_process(process_type: &str, command_line: &str, default: bool) -> ProcessDescriptor {
    ProcessDescriptor {
        process_type: process_type.to_string(),
        command: command_line.to_string(),
        arguments: None,
        direct: false,
        default,
    }
}

fn direct_process(
    process_type: &str,
    command_line: &str,
    default: bool,
) -> Result<ProcessDescriptor, ParseError> {
    let (command, arguments) = tokenize(command_line)?;
    Ok(ProcessDescriptor {
        process_type: process_type.to_string(),
        command,
        arguments: Some(arguments),
        direct: true,
        default,
    })
}
