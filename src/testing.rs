//! In-memory collaborators for exercising the runners without a real
//! Terraform binary.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::TerraformError;
use crate::host::{
    Environment, ExecutionResult, FileSystem, PlatformFamily, ProcessRunner, ProcessSpec,
};
use crate::terraform::{EnvListRunner, EnvSettings, EnvironmentList, executable_name};

pub const FAKE_WORKING_DIRECTORY: &str = "/Working";

#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    files: HashSet<PathBuf>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    pub fn remove_file(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl FileSystem for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    pub family: PlatformFamily,
    pub working_directory: PathBuf,
    pub variables: BTreeMap<String, String>,
}

impl FakeEnvironment {
    pub fn new(family: PlatformFamily) -> Self {
        Self {
            family,
            working_directory: PathBuf::from(FAKE_WORKING_DIRECTORY),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl Environment for FakeEnvironment {
    fn platform_family(&self) -> PlatformFamily {
        self.family
    }

    fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}

/// Records every invocation and answers with a canned exit code and stdout.
#[derive(Debug, Default)]
pub struct FakeProcessRunner {
    exit_code: i32,
    standard_output: Vec<u8>,
    invocations: Mutex<Vec<ProcessSpec>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn with_standard_output<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_output = lines
            .into_iter()
            .map(|line| {
                let mut line: String = line.into();
                line.push('\n');
                line
            })
            .collect::<String>()
            .into_bytes();
        self
    }

    pub fn with_raw_standard_output(mut self, stdout: Vec<u8>) -> Self {
        self.standard_output = stdout;
        self
    }

    pub fn invocations(&self) -> Vec<ProcessSpec> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_invocation(&self) -> Option<ProcessSpec> {
        self.invocations().pop()
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn run(&self, spec: &ProcessSpec) -> Result<ExecutionResult, TerraformError> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(spec.clone());
        Ok(ExecutionResult {
            exit_code: self.exit_code,
            stdout: self.standard_output.clone(),
            stderr: Vec::new(),
        })
    }
}

/// What the fixture observed the runner start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFixtureResult {
    pub path: PathBuf,
    pub args: String,
}

/// Wires fakes around a runner, with a default executable registered in
/// the tools directory and `default` as the only workspace.
#[derive(Debug)]
pub struct TerraformFixture {
    pub settings: EnvSettings,
    pub file_system: FakeFileSystem,
    pub environment: FakeEnvironment,
    pub process_runner: FakeProcessRunner,
}

impl TerraformFixture {
    pub fn new(family: PlatformFamily) -> Self {
        let environment = FakeEnvironment::new(family);
        let file_system = FakeFileSystem::new().with_file(Self::default_tool_path(&environment));
        Self {
            settings: EnvSettings::new(),
            file_system,
            environment,
            process_runner: FakeProcessRunner::new().with_standard_output(["default"]),
        }
    }

    fn default_tool_path(environment: &FakeEnvironment) -> PathBuf {
        environment
            .working_directory
            .join("tools")
            .join(executable_name(environment.family))
    }

    pub fn given_default_tool_does_not_exist(&mut self) {
        let path = Self::default_tool_path(&self.environment);
        self.file_system.remove_file(&path);
    }

    pub fn given_settings_tool_path_exists(&mut self) {
        if let Some(path) = self.settings.tool_path.clone() {
            self.file_system.add_file(path);
        }
    }

    pub fn given_process_exits_with_code(&mut self, exit_code: i32) {
        let runner = std::mem::take(&mut self.process_runner);
        self.process_runner = runner.with_exit_code(exit_code);
    }

    pub fn given_standard_output<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let runner = std::mem::take(&mut self.process_runner);
        self.process_runner = runner.with_standard_output(lines);
    }

    /// Runs the list runner, returning what was started and what was parsed.
    pub async fn run_list(
        self,
    ) -> Result<(ToolFixtureResult, EnvironmentList), TerraformError> {
        let process_runner = Arc::new(self.process_runner);
        let runner = EnvListRunner::new(
            Arc::new(self.file_system),
            Arc::new(self.environment),
            process_runner.clone(),
        );

        let workspaces = runner.run(&self.settings).await?;

        let spec = process_runner
            .last_invocation()
            .unwrap_or_default();
        Ok((
            ToolFixtureResult {
                path: spec.program.clone(),
                args: spec.render_args(),
            },
            workspaces,
        ))
    }
}
