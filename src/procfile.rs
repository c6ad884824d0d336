//! Procfile discovery.
//!
//! Process types can be declared in two places:
//!
//! - A `Procfile` at the application root, decoded as a YAML mapping of
//!   process type to command line (`web: bundle exec rackup`). Number and
//!   boolean values are taken as their textual form.
//! - The `BP_PROCFILE_DEFAULT_PROCESS` platform variable, which declares the
//!   command of the `web` process type.

use crate::plan::PlanError;
use crate::process::{ProcessTypeMap, WEB_PROCESS_TYPE};
use log::debug;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::Path;

/// File name of the Procfile inside the application directory
pub const PROCFILE_NAME: &str = "Procfile";

/// Platform variable declaring the `web` process command
pub const DEFAULT_PROCESS_ENV: &str = "BP_PROCFILE_DEFAULT_PROCESS";

/// Declared process types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Procfile(ProcessTypeMap);

impl Procfile {
    /// Read `Procfile` from the application directory.
    ///
    /// A missing file yields an empty Procfile.
    pub fn from_path(application_dir: &Path) -> Result<Self, PlanError> {
        let path = application_dir.join(PROCFILE_NAME);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No Procfile at {:?}", path);
                return Ok(Self::default());
            }
            Err(source) => return Err(PlanError::Read { path, source }),
        };

        // An empty document decodes to null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let values: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(&content)
            .map_err(|source| PlanError::Procfile { path: path.clone(), source })?;

        let entries = values
            .into_iter()
            .map(|(process_type, value)| {
                let command = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => return Err(PlanError::InvalidCommand { process_type }),
                };
                Ok((process_type, command))
            })
            .collect::<Result<ProcessTypeMap, _>>()?;
        debug!("Read {} process types from {:?}", entries.len(), path);

        Ok(Self(entries))
    }

    /// Declare the `web` process from [`DEFAULT_PROCESS_ENV`] when it is set
    pub fn from_environment(environment: &BTreeMap<String, String>) -> Self {
        let mut entries = ProcessTypeMap::new();

        if let Some(command) = environment.get(DEFAULT_PROCESS_ENV).filter(|c| !c.trim().is_empty()) {
            entries.insert(WEB_PROCESS_TYPE.to_string(), command.clone());
        }

        Self(entries)
    }

    /// Overlay another Procfile, its process types replacing ours
    pub fn merge(&mut self, other: Procfile) {
        self.0.extend(other.0);
    }

    pub fn into_inner(self) -> ProcessTypeMap {
        self.0
    }
}

impl Deref for Procfile {
    type Target = ProcessTypeMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
