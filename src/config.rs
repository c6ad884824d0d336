//! Runtime configuration resolution.
//!
//! Command-line flags take precedence over the environment the lifecycle
//! exports. Anything left unset falls back to a documented default.

use log::debug;
use std::env;
use std::path::{Path, PathBuf};

use crate::result::LAUNCH_TOML;

/// Environment variable the lifecycle sets to the current stack identifier
pub const STACK_ID_ENV: &str = "CNB_STACK_ID";

/// Output path meaning standard output
pub const STDOUT_PATH: &str = "-";

/// Resolve the stack identifier.
///
/// Resolution rules:
/// 1. An explicit value (from `--stack`) is used as-is
/// 2. Otherwise the `CNB_STACK_ID` environment variable
/// 3. Otherwise empty, which selects shell execution
pub fn resolve_stack_id(explicit: Option<&str>) -> String {
    stack_id_from(explicit, env::var(STACK_ID_ENV).ok())
}

fn stack_id_from(explicit: Option<&str>, from_env: Option<String>) -> String {
    let stack_id = match explicit {
        Some(stack_id) => stack_id.to_string(),
        None => from_env.unwrap_or_default(),
    };
    debug!("Resolved stack id: {:?}", stack_id);
    stack_id
}

/// Destination of a rendered build result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Resolve where the build result goes.
    ///
    /// `-` selects standard output; no explicit output selects
    /// `<layers_dir>/launch.toml`.
    pub fn resolve(output: Option<&Path>, layers_dir: &Path) -> Self {
        match output {
            Some(path) if path == Path::new(STDOUT_PATH) => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::File(layers_dir.join(LAUNCH_TOML)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_stack_wins() {
        assert_eq!(
            stack_id_from(Some("io.paketo.stacks.tiny"), Some("io.buildpacks.stacks.bionic".to_string())),
            "io.paketo.stacks.tiny"
        );
    }

    #[test]
    fn test_stack_from_environment() {
        assert_eq!(stack_id_from(None, Some("io.buildpacks.stacks.bionic".to_string())), "io.buildpacks.stacks.bionic");
        assert_eq!(stack_id_from(None, None), "");
    }

    #[test]
    fn test_output_target() {
        let layers = Path::new("/layers");
        assert_eq!(OutputTarget::resolve(None, layers), OutputTarget::File(PathBuf::from("/layers/launch.toml")));
        assert_eq!(OutputTarget::resolve(Some(Path::new("-")), layers), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::resolve(Some(Path::new("out.json")), layers),
            OutputTarget::File(PathBuf::from("out.json"))
        );
    }
}
