use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or running the Terraform executable.
///
/// The `ToolNotFound` and `ExecutionFailed` messages are part of the public
/// contract and are matched verbatim by callers.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// Neither the configured tool path nor any default location exists
    #[error("Terraform: Could not locate executable.")]
    ToolNotFound,

    /// The process ran to completion with a non-zero exit code
    #[error("Terraform: Process returned an error (exit code {exit_code}).")]
    ExecutionFailed { exit_code: i32 },

    /// The process could not be started at all
    #[error("Terraform: Could not start process `{}`: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Terraform: Process output was not valid UTF-8.")]
    InvalidOutput(#[source] std::string::FromUtf8Error),

    #[error("Terraform: Invalid workspace name '{0}'.")]
    InvalidWorkspaceName(String),
}
