use crate::plan::{BuildPlan, PlanError};
use crate::process::{self, ExecutionMode};
use crate::result::BuildResult;
use crate::tokenizer::ParseError;
use log::info;

/// Inputs of the build phase
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub plan: BuildPlan,
    pub stack_id: String,
}

/// Errors that can occur during the build phase
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Command(#[from] ParseError),
}

/// Turn the `procfile` plan entries into launch processes.
///
/// Returns the empty [`BuildResult`] when the plan declares no process
/// types. Otherwise the stack decides the execution mode and every process
/// type becomes one launch process.
pub fn build(context: &BuildContext) -> Result<BuildResult, BuildError> {
    let process_types = context.plan.process_types()?;
    if process_types.is_empty() {
        return Ok(BuildResult::default());
    }

    let mode = ExecutionMode::from_stack_id(&context.stack_id);
    info!("Contributing {} process types in {} mode", process_types.len(), mode);

    let processes = process::build(&process_types, mode)?;
    for p in &processes {
        if p.default {
            info!("  {} (default): {}", p.process_type, process_types[&p.process_type]);
        } else {
            info!("  {}: {}", p.process_type, process_types[&p.process_type]);
        }
    }

    Ok(BuildResult { processes })
}
