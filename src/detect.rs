//! Detect phase.
//!
//! The buildpack participates when at least one process type is declared,
//! either by a `Procfile` or by the platform environment. It then provides
//! `procfile` and requires it back with the declared process types as
//! metadata, which the build phase receives in its plan.

use crate::plan::{PlanError, PLAN_ENTRY_NAME};
use crate::platform::Platform;
use crate::procfile::Procfile;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Inputs of the detect phase
#[derive(Debug, Clone)]
pub struct DetectContext {
    pub application_dir: PathBuf,
    pub platform: Platform,
}

/// Dependency provided by a buildpack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlanProvide {
    pub name: String,
}

/// Dependency required by a buildpack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlanRequire {
    pub name: String,
    #[serde(skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

/// Plan contributed on a passing detection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectPlan {
    pub provides: Vec<BuildPlanProvide>,
    pub requires: Vec<BuildPlanRequire>,
}

/// Outcome of detection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectResult {
    pub pass: bool,
    pub plan: DetectPlan,
}

/// Detect declared process types
pub fn detect(context: &DetectContext) -> Result<DetectResult, PlanError> {
    let mut procfile = Procfile::from_path(&context.application_dir)?;
    procfile.merge(Procfile::from_environment(&context.platform.environment));

    if procfile.is_empty() {
        info!("No process types declared");
        return Ok(DetectResult::default());
    }

    info!(
        "Detected process types: {}",
        procfile.keys().cloned().collect::<Vec<_>>().join(", ")
    );

    let metadata = procfile
        .into_inner()
        .into_iter()
        .map(|(process_type, command)| (process_type, toml::Value::String(command)))
        .collect();

    Ok(DetectResult {
        pass: true,
        plan: DetectPlan {
            provides: vec![BuildPlanProvide {
                name: PLAN_ENTRY_NAME.to_string(),
            }],
            requires: vec![BuildPlanRequire {
                name: PLAN_ENTRY_NAME.to_string(),
                metadata,
            }],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procfile::{DEFAULT_PROCESS_ENV, PROCFILE_NAME};

    fn context(dir: &tempfile::TempDir) -> DetectContext {
        DetectContext {
            application_dir: dir.path().to_path_buf(),
            platform: Platform::default(),
        }
    }

    #[test]
    fn test_fails_without_process_types() {
        let dir = tempfile::tempdir().unwrap();
        let result = detect(&context(&dir)).unwrap();
        assert!(!result.pass);
        assert_eq!(result.plan, DetectPlan::default());
    }

    #[test]
    fn test_passes_with_procfile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROCFILE_NAME), "test-type: test-command\n").unwrap();

        let result = detect(&context(&dir)).unwrap();
        assert!(result.pass);
        assert_eq!(result.plan.provides, vec![BuildPlanProvide { name: "procfile".to_string() }]);
        assert_eq!(result.plan.requires.len(), 1);
        assert_eq!(result.plan.requires[0].name, "procfile");
        assert_eq!(
            result.plan.requires[0].metadata.get("test-type").and_then(|v| v.as_str()),
            Some("test-command")
        );
    }

    #[test]
    fn test_passes_with_environment() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        ctx.platform
            .environment
            .insert(DEFAULT_PROCESS_ENV.to_string(), "test-command".to_string());

        let result = detect(&ctx).unwrap();
        assert!(result.pass);
        assert_eq!(
            result.plan.requires[0].metadata.get("web").and_then(|v| v.as_str()),
            Some("test-command")
        );
    }

    #[test]
    fn test_environment_overrides_procfile_web() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROCFILE_NAME), "web: from-file\nworker: w\n").unwrap();
        let mut ctx = context(&dir);
        ctx.platform
            .environment
            .insert(DEFAULT_PROCESS_ENV.to_string(), "from-env".to_string());

        let metadata = detect(&ctx).unwrap().plan.requires.remove(0).metadata;
        assert_eq!(metadata.get("web").and_then(|v| v.as_str()), Some("from-env"));
        assert_eq!(metadata.get("worker").and_then(|v| v.as_str()), Some("w"));
    }

    #[test]
    fn test_plan_serializes_as_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROCFILE_NAME), "web: bin/server\n").unwrap();

        let plan = detect(&context(&dir)).unwrap().plan;
        let rendered = toml::to_string(&plan).unwrap();
        let value: toml::Table = toml::from_str(&rendered).unwrap();

        assert_eq!(value["provides"][0]["name"].as_str(), Some("procfile"));
        assert_eq!(value["requires"][0]["metadata"]["web"].as_str(), Some("bin/server"));
    }
}
