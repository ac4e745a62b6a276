use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::host::Environment;

/// Which sub-command keyword manages workspaces.
///
/// `env` is the pre-0.10 spelling that Terraform still accepts as a
/// deprecated alias of `workspace`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvCommand {
    #[default]
    Workspace,
    Env,
}

impl EnvCommand {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Env => "env",
        }
    }
}

/// Settings every tool invocation shares, independent of the sub-command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSettings {
    pub working_directory: Option<PathBuf>,
    pub environment_variables: BTreeMap<String, String>,
    /// Extra command-line flags, appended in the order given.
    pub arguments: Vec<String>,
}

impl ToolSettings {
    /// Resolves the configured working directory against the host's.
    pub fn resolve_working_directory(&self, environment: &dyn Environment) -> PathBuf {
        let base = environment.working_directory();
        match &self.working_directory {
            Some(dir) => base.join(dir),
            None => base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub tool_path: Option<PathBuf>,
    pub env_command: EnvCommand,
    /// Only honored by `delete`.
    pub force: bool,
    pub tool: ToolSettings,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tool_path = Some(path.into());
        self
    }

    pub fn with_env_command(mut self, env_command: EnvCommand) -> Self {
        self.env_command = env_command;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool.working_directory = Some(dir.into());
        self
    }

    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.tool
            .environment_variables
            .insert(key.into(), value.into());
        self
    }

    pub fn with_argument(mut self, arg: impl Into<String>) -> Self {
        self.tool.arguments.push(arg.into());
        self
    }

    pub fn with_arguments<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool.arguments.extend(args.into_iter().map(Into::into));
        self
    }
}
