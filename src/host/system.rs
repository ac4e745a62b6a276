use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Environment, ExecutionResult, FileSystem, PlatformFamily, ProcessRunner, ProcessSpec};
use crate::error::TerraformError;

/// Exit code reported when the child was terminated without one (e.g. by a signal).
const NO_EXIT_CODE: i32 = -1;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn platform_family(&self) -> PlatformFamily {
        PlatformFamily::current()
    }

    fn working_directory(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    fn variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Runs child processes on the tokio runtime, capturing stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, spec: &ProcessSpec) -> Result<ExecutionResult, TerraformError> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(&spec.environment_variables)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_directory {
            command.current_dir(dir);
        }

        tracing::debug!(
            program = %spec.program.display(),
            args = %spec.render_args(),
            "starting process"
        );

        let output = command
            .output()
            .await
            .map_err(|source| TerraformError::Spawn {
                path: spec.program.clone(),
                source,
            })?;

        let stderr: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string)
            .collect();
        for line in &stderr {
            tracing::debug!(line = %line, "terraform stderr");
        }

        let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
        tracing::debug!(exit_code, "process exited");

        Ok(ExecutionResult {
            exit_code,
            stdout: output.stdout,
            stderr,
        })
    }
}
