//! Collaborators the Terraform runners need from their host: a file system
//! for existence checks, an environment describing the platform, and a
//! process runner that starts the executable and captures its output.

mod system;

pub use system::{SystemEnvironment, SystemFileSystem, TokioProcessRunner};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::TerraformError;

/// Coarse OS classification used to pick the executable file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Linux,
    OSX,
    Unknown,
}

impl PlatformFamily {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::OSX
        } else if cfg!(unix) {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }
}

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

pub trait Environment: Send + Sync {
    fn platform_family(&self) -> PlatformFamily;

    /// Directory relative settings paths are resolved against.
    fn working_directory(&self) -> PathBuf;

    fn variable(&self, name: &str) -> Option<String>;
}

/// A fully resolved child process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub environment_variables: BTreeMap<String, String>,
}

impl ProcessSpec {
    /// Renders the argument list as a single display string, quoting
    /// arguments that contain whitespace.
    pub fn render_args(&self) -> String {
        self.args
            .iter()
            .map(|arg| quote_arg(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.chars().any(char::is_whitespace) {
        return format!("\"{}\"", arg.replace('"', "\\\""));
    }
    arg.to_string()
}

/// Exit code and captured output of a finished process.
///
/// Stdout is kept as raw bytes so the exit code is always available, even
/// when the output is not text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    /// Captured for diagnostics only, never interpreted.
    pub stderr: Vec<String>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Standard output lines in emission order. Fails if stdout is not UTF-8.
    pub fn lines(&self) -> Result<Vec<String>, TerraformError> {
        let stdout =
            String::from_utf8(self.stdout.clone()).map_err(TerraformError::InvalidOutput)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Starts the process and waits for it to terminate.
    async fn run(&self, spec: &ProcessSpec) -> Result<ExecutionResult, TerraformError>;
}
