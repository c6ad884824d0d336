//! Buildpack plan loading.
//!
//! The lifecycle hands the build phase a `plan.toml` listing the entries this
//! buildpack was asked to satisfy:
//!
//! ```toml
//! [[entries]]
//! name = "procfile"
//!
//! [entries.metadata]
//! web = "bin/server --port 8080"
//! worker = "bin/worker"
//! ```
//!
//! Every `procfile` entry contributes its metadata table as process types.

use crate::process::ProcessTypeMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Plan entry name carrying process types
pub const PLAN_ENTRY_NAME: &str = "procfile";

/// Errors that can occur while reading plans and Procfiles
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("unable to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode plan {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to decode Procfile {path}")]
    Procfile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("command for process type '{process_type}' must be a string")]
    InvalidCommand { process_type: String },
}

/// Buildpack plan supplied to the build phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default)]
    pub entries: Vec<BuildPlanEntry>,
}

/// Single requirement resolved for this buildpack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlanEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

impl BuildPlan {
    /// Merge the process types of every `procfile` entry.
    ///
    /// Entries are applied in plan order, so a process type declared by more
    /// than one entry takes the command of the last one.
    pub fn process_types(&self) -> Result<ProcessTypeMap, PlanError> {
        let mut process_types = ProcessTypeMap::new();

        for entry in self.entries.iter().filter(|e| e.name == PLAN_ENTRY_NAME) {
            for (process_type, value) in &entry.metadata {
                let command = value.as_str().ok_or_else(|| PlanError::InvalidCommand {
                    process_type: process_type.clone(),
                })?;

                if let Some(previous) = process_types.insert(process_type.clone(), command.to_string()) {
                    debug!(
                        "Process type '{}' redeclared, replacing '{}' with '{}'",
                        process_type, previous, command
                    );
                }
            }
        }

        Ok(process_types)
    }
}

/// Load and parse a buildpack plan from a TOML file
pub fn load_plan(plan_path: &Path) -> Result<BuildPlan, PlanError> {
    debug!("Loading buildpack plan from: {:?}", plan_path);

    let content = std::fs::read_to_string(plan_path).map_err(|source| PlanError::Read {
        path: plan_path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| PlanError::Decode {
        path: plan_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(name: &str, pairs: &[(&str, &str)]) -> BuildPlanEntry {
        BuildPlanEntry {
            name: name.to_string(),
            metadata: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), toml::Value::String(v.to_string())))
                .collect(),
        }
    }

    #[test]
    fn test_load_plan() {
        let plan = r#"
[[entries]]
name = "procfile"

[entries.metadata]
web = "bin/server --port 8080"
worker = "bin/worker"

[[entries]]
name = "jvm-application"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", plan).unwrap();

        let plan = load_plan(temp_file.path()).unwrap();
        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[1].name, "jvm-application");
        assert!(plan.entries[1].metadata.is_empty());

        let process_types = plan.process_types().unwrap();
        assert_eq!(process_types.len(), 2);
        assert_eq!(process_types["web"], "bin/server --port 8080");
        assert_eq!(process_types["worker"], "bin/worker");
    }

    #[test]
    fn test_empty_plan() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "").unwrap();

        let plan = load_plan(temp_file.path()).unwrap();
        assert!(plan.entries.is_empty());
        assert!(plan.process_types().unwrap().is_empty());
    }

    #[test]
    fn test_missing_plan() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_plan(&dir.path().join("plan.toml")).unwrap_err();
        assert!(matches!(err, PlanError::Read { .. }));
    }

    #[test]
    fn test_malformed_plan() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[[entries]\nname = ").unwrap();

        let err = load_plan(temp_file.path()).unwrap_err();
        assert!(matches!(err, PlanError::Decode { .. }));
    }

    #[test]
    fn test_ignores_other_entries() {
        let plan = BuildPlan {
            entries: vec![entry("jvm-application", &[("web", "java -jar app.jar")])],
        };
        assert!(plan.process_types().unwrap().is_empty());
    }

    #[test]
    fn test_last_entry_wins() {
        let plan = BuildPlan {
            entries: vec![
                entry(PLAN_ENTRY_NAME, &[("web", "first"), ("worker", "w")]),
                entry(PLAN_ENTRY_NAME, &[("web", "second")]),
            ],
        };

        let process_types = plan.process_types().unwrap();
        assert_eq!(process_types["web"], "second");
        assert_eq!(process_types["worker"], "w");
    }

    #[test]
    fn test_rejects_non_string_command() {
        let mut metadata = toml::Table::new();
        metadata.insert("web".to_string(), toml::Value::Integer(8080));
        let plan = BuildPlan {
            entries: vec![BuildPlanEntry {
                name: PLAN_ENTRY_NAME.to_string(),
                metadata,
            }],
        };

        let err = plan.process_types().unwrap_err();
        assert!(matches!(err, PlanError::InvalidCommand { ref process_type } if process_type == "web"));
    }
}
