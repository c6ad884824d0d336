//! Platform environment.
//!
//! The lifecycle exposes user-provided build variables as files under
//! `<platform>/env/`: the file name is the variable name and the file
//! content its value.

use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading the platform directory
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("unable to read platform environment {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Platform provided to detect and build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub environment: BTreeMap<String, String>,
}

impl Platform {
    /// Load the platform environment from `<platform_dir>/env`.
    ///
    /// A missing `env` directory is an empty environment. Trailing newlines
    /// are trimmed from values; subdirectories are skipped.
    pub fn load(platform_dir: &Path) -> Result<Self, PlatformError> {
        let env_dir = platform_dir.join("env");
        let entries = match std::fs::read_dir(&env_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No platform environment at {:?}", env_dir);
                return Ok(Self::default());
            }
            Err(source) => return Err(PlatformError::Read { path: env_dir, source }),
        };

        let mut environment = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(read_error(&env_dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let value = std::fs::read_to_string(&path).map_err(read_error(&path))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            environment.insert(name, value.trim_end_matches(['\n', '\r']).to_string());
        }

        debug!("Loaded {} platform variables from {:?}", environment.len(), env_dir);
        Ok(Self { environment })
    }
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> PlatformError {
    let path = path.to_path_buf();
    move |source| PlatformError::Read { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_dir() {
        let dir = tempfile::tempdir().unwrap();
        let platform = Platform::load(dir.path()).unwrap();
        assert!(platform.environment.is_empty());
    }

    #[test]
    fn test_load_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env_dir = dir.path().join("env");
        std::fs::create_dir_all(env_dir.join("nested")).unwrap();
        std::fs::write(env_dir.join("BP_PROCFILE_DEFAULT_PROCESS"), "bin/server --port 8080\n").unwrap();
        std::fs::write(env_dir.join("BP_DEBUG"), "true").unwrap();

        let platform = Platform::load(dir.path()).unwrap();
        assert_eq!(platform.environment.len(), 2);
        assert_eq!(platform.environment["BP_PROCFILE_DEFAULT_PROCESS"], "bin/server --port 8080");
        assert_eq!(platform.environment["BP_DEBUG"], "true");
    }
}
