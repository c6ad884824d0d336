//! Build result and launch metadata serialization.
//!
//! The build phase reports its processes in `<layers>/launch.toml`:
//!
//! ```toml
//! [[processes]]
//! type = "web"
//! command = "bin/server"
//! args = ["--port", "8080"]
//! direct = true
//! default = true
//! ```
//!
//! JSON and YAML renderings of the same structure are available for
//! inspection.

use crate::process::ProcessDescriptor;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// File name of the launch metadata inside the layers directory
pub const LAUNCH_TOML: &str = "launch.toml";

/// Result of the build phase.
///
/// The default value is the empty result returned when there is nothing to
/// contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processes: Vec<ProcessDescriptor>,
}

impl BuildResult {
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Process launched when none is named
    pub fn default_process(&self) -> Option<&ProcessDescriptor> {
        self.processes.iter().find(|p| p.default)
    }
}

/// Serialization format for build results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
    Yaml,
}

/// Errors that can occur while writing build results
#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("unable to encode result as TOML")]
    Toml(#[from] toml::ser::Error),

    #[error("unable to encode result as JSON")]
    Json(#[from] serde_json::Error),

    #[error("unable to encode result as YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unable to write result")]
    Io(#[from] std::io::Error),
}

/// Render a build result in the given format
pub fn render_result(result: &BuildResult, format: OutputFormat) -> Result<String, ResultError> {
    let rendered = match format {
        OutputFormat::Toml => toml::to_string(result)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(result)?,
    };
    Ok(rendered)
}

/// Write a build result to `writer` in the given format
pub fn write_result<W: Write>(
    result: &BuildResult,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), ResultError> {
    writer.write_all(render_result(result, format)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}
