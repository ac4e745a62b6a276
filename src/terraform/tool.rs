use std::sync::Arc;

use super::locator::locate;
use super::settings::EnvSettings;
use crate::error::TerraformError;
use crate::host::{Environment, ExecutionResult, FileSystem, ProcessRunner, ProcessSpec};

/// Locate-then-execute plumbing shared by every runner.
#[derive(Clone)]
pub(crate) struct Tool {
    file_system: Arc<dyn FileSystem>,
    environment: Arc<dyn Environment>,
    process_runner: Arc<dyn ProcessRunner>,
}

impl Tool {
    pub(crate) fn new(
        file_system: Arc<dyn FileSystem>,
        environment: Arc<dyn Environment>,
        process_runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            file_system,
            environment,
            process_runner,
        }
    }

    /// Runs the executable with `args` and fails on a non-zero exit code.
    pub(crate) async fn execute(
        &self,
        settings: &EnvSettings,
        args: Vec<String>,
    ) -> Result<ExecutionResult, TerraformError> {
        let program = locate(
            settings,
            self.file_system.as_ref(),
            self.environment.as_ref(),
        )?;

        let spec = ProcessSpec {
            program,
            args,
            working_directory: Some(
                settings
                    .tool
                    .resolve_working_directory(self.environment.as_ref()),
            ),
            environment_variables: settings.tool.environment_variables.clone(),
        };

        tracing::info!(
            program = %spec.program.display(),
            args = %spec.render_args(),
            "running terraform"
        );

        let result = self.process_runner.run(&spec).await?;
        if !result.success() {
            return Err(TerraformError::ExecutionFailed {
                exit_code: result.exit_code,
            });
        }
        Ok(result)
    }
}
