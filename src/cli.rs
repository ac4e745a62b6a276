mod args;

pub use args::{Cli, WorkspaceCommand};

use tfws::terraform::{EnvCommand, EnvSettings};

impl Cli {
    /// Builds runner settings from the global flags plus per-command extras.
    pub fn settings(&self, extra: &[String]) -> EnvSettings {
        let mut settings = EnvSettings::new()
            .with_env_command(if self.legacy_env {
                EnvCommand::Env
            } else {
                EnvCommand::Workspace
            })
            .with_arguments(extra.iter().cloned());
        if let Some(path) = &self.terraform {
            settings = settings.with_tool_path(path);
        }
        if let Some(dir) = &self.chdir {
            settings = settings.with_working_directory(dir);
        }
        settings
    }
}
