use std::sync::Arc;

use super::settings::EnvSettings;
use super::tool::Tool;
use super::workspace::EnvironmentList;
use crate::error::TerraformError;
use crate::host::{Environment, FileSystem, ProcessRunner};

const LIST_ACTION: &str = "list";
const FORCE_FLAG: &str = "-force";

/// Workspace sub-actions that change Terraform state rather than read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvAction {
    New,
    Select,
    Delete,
}

impl EnvAction {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Select => "select",
            Self::Delete => "delete",
        }
    }
}

/// `<keyword> list [args...]`
pub fn list_arguments(settings: &EnvSettings) -> Vec<String> {
    let mut args = vec![
        settings.env_command.keyword().to_string(),
        LIST_ACTION.to_string(),
    ];
    args.extend(settings.tool.arguments.iter().cloned());
    args
}

/// `<keyword> <action> [-force] [args...] <name>`
pub fn change_arguments(settings: &EnvSettings, action: EnvAction, name: &str) -> Vec<String> {
    let mut args = vec![
        settings.env_command.keyword().to_string(),
        action.keyword().to_string(),
    ];
    if action == EnvAction::Delete && settings.force {
        args.push(FORCE_FLAG.to_string());
    }
    args.extend(settings.tool.arguments.iter().cloned());
    args.push(name.to_string());
    args
}

/// Runs `terraform workspace list` and parses the workspace names.
#[derive(Clone)]
pub struct EnvListRunner {
    tool: Tool,
}

impl EnvListRunner {
    pub fn new(
        file_system: Arc<dyn FileSystem>,
        environment: Arc<dyn Environment>,
        process_runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            tool: Tool::new(file_system, environment, process_runner),
        }
    }

    pub async fn run(&self, settings: &EnvSettings) -> Result<EnvironmentList, TerraformError> {
        let result = self.tool.execute(settings, list_arguments(settings)).await?;
        let workspaces = EnvironmentList::try_from(&result)?;

        tracing::info!(
            count = workspaces.len(),
            current = workspaces.current().unwrap_or("-"),
            "workspaces listed"
        );

        Ok(workspaces)
    }
}

/// Runs `terraform workspace new|select|delete <name>`.
#[derive(Clone)]
pub struct EnvChangeRunner {
    action: EnvAction,
    tool: Tool,
}

impl EnvChangeRunner {
    pub fn new(
        action: EnvAction,
        file_system: Arc<dyn FileSystem>,
        environment: Arc<dyn Environment>,
        process_runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            action,
            tool: Tool::new(file_system, environment, process_runner),
        }
    }

    pub fn action(&self) -> EnvAction {
        self.action
    }

    pub async fn run(&self, settings: &EnvSettings, name: &str) -> Result<(), TerraformError> {
        let workspace = name.trim();
        if workspace.is_empty() {
            return Err(TerraformError::InvalidWorkspaceName(name.to_string()));
        }

        self.tool
            .execute(settings, change_arguments(settings, self.action, workspace))
            .await?;

        tracing::info!(action = self.action.keyword(), workspace, "workspace updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{PlatformFamily, ProcessSpec};
    use crate::terraform::EnvCommand;
    use crate::testing::{FakeEnvironment, FakeFileSystem, FakeProcessRunner};
    use std::path::PathBuf;

    fn linux_collaborators(
        process_runner: FakeProcessRunner,
    ) -> (Arc<FakeFileSystem>, Arc<FakeEnvironment>, Arc<FakeProcessRunner>) {
        (
            Arc::new(FakeFileSystem::new().with_file("/Working/tools/terraform")),
            Arc::new(FakeEnvironment::new(PlatformFamily::Linux)),
            Arc::new(process_runner),
        )
    }

    fn last_spec(process_runner: &FakeProcessRunner) -> ProcessSpec {
        process_runner
            .last_invocation()
            .expect("process runner was not invoked")
    }

    #[test]
    fn test_list_arguments_default() {
        let args = list_arguments(&EnvSettings::new());
        assert_eq!(args, vec!["workspace", "list"]);
    }

    #[test]
    fn test_list_arguments_env_with_extras() {
        let settings = EnvSettings::new()
            .with_env_command(EnvCommand::Env)
            .with_arguments(["-no-color", "infra"]);
        assert_eq!(
            list_arguments(&settings),
            vec!["env", "list", "-no-color", "infra"]
        );
    }

    #[test]
    fn test_change_arguments_force_only_for_delete() {
        let settings = EnvSettings::new().with_force(true);
        assert_eq!(
            change_arguments(&settings, EnvAction::Delete, "old"),
            vec!["workspace", "delete", "-force", "old"]
        );
        assert_eq!(
            change_arguments(&settings, EnvAction::Select, "old"),
            vec!["workspace", "select", "old"]
        );
    }

    #[test]
    fn test_change_arguments_name_is_last() {
        let settings = EnvSettings::new()
            .with_env_command(EnvCommand::Env)
            .with_argument("-lock=false");
        assert_eq!(
            change_arguments(&settings, EnvAction::New, "staging"),
            vec!["env", "new", "-lock=false", "staging"]
        );
    }

    #[tokio::test]
    async fn test_list_runner_parses_output() {
        let (fs, env, pr) = linux_collaborators(
            FakeProcessRunner::new().with_standard_output(["  default", "* staging"]),
        );
        let runner = EnvListRunner::new(fs, env, pr.clone());

        let workspaces = runner.run(&EnvSettings::new()).await.unwrap();

        assert_eq!(workspaces.names(), &["default", "staging"]);
        assert_eq!(workspaces.current(), Some("staging"));
        let spec = last_spec(&pr);
        assert_eq!(spec.program, PathBuf::from("/Working/tools/terraform"));
        assert_eq!(spec.working_directory, Some(PathBuf::from("/Working")));
    }

    #[tokio::test]
    async fn test_list_runner_passes_environment_variables() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new());
        let runner = EnvListRunner::new(fs, env, pr.clone());
        let settings = EnvSettings::new().with_environment_variable("TF_DATA_DIR", ".tf");

        runner.run(&settings).await.unwrap();

        let spec = last_spec(&pr);
        assert_eq!(
            spec.environment_variables.get("TF_DATA_DIR"),
            Some(&".tf".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_runner_non_zero_exit() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new().with_exit_code(127));
        let runner = EnvListRunner::new(fs, env, pr);

        let err = runner.run(&EnvSettings::new()).await.unwrap_err();
        assert!(matches!(
            err,
            TerraformError::ExecutionFailed { exit_code: 127 }
        ));
        assert_eq!(
            err.to_string(),
            "Terraform: Process returned an error (exit code 127)."
        );
    }

    #[tokio::test]
    async fn test_list_runner_exit_code_wins_over_binary_output() {
        let (fs, env, pr) = linux_collaborators(
            FakeProcessRunner::new()
                .with_raw_standard_output(vec![0xff, 0xfe])
                .with_exit_code(2),
        );
        let runner = EnvListRunner::new(fs, env, pr);

        let err = runner.run(&EnvSettings::new()).await.unwrap_err();
        assert!(matches!(err, TerraformError::ExecutionFailed { exit_code: 2 }));
        assert_eq!(
            err.to_string(),
            "Terraform: Process returned an error (exit code 2)."
        );
    }

    #[tokio::test]
    async fn test_list_runner_rejects_binary_output_on_success() {
        let (fs, env, pr) = linux_collaborators(
            FakeProcessRunner::new().with_raw_standard_output(vec![0xff, 0xfe]),
        );
        let runner = EnvListRunner::new(fs, env, pr);

        let err = runner.run(&EnvSettings::new()).await.unwrap_err();
        assert!(matches!(err, TerraformError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn test_change_runner_ignores_binary_output() {
        let (fs, env, pr) = linux_collaborators(
            FakeProcessRunner::new().with_raw_standard_output(vec![0xff, 0xfe]),
        );
        let runner = EnvChangeRunner::new(EnvAction::Select, fs, env, pr);

        runner.run(&EnvSettings::new(), "prod").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_runner_tool_not_found_skips_process() {
        let pr = Arc::new(FakeProcessRunner::new());
        let runner = EnvListRunner::new(
            Arc::new(FakeFileSystem::new()),
            Arc::new(FakeEnvironment::new(PlatformFamily::Linux)),
            pr.clone(),
        );

        let err = runner.run(&EnvSettings::new()).await.unwrap_err();
        assert!(matches!(err, TerraformError::ToolNotFound));
        assert!(pr.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_change_runner_select() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new());
        let runner = EnvChangeRunner::new(EnvAction::Select, fs, env, pr.clone());

        runner.run(&EnvSettings::new(), "prod").await.unwrap();

        assert_eq!(runner.action(), EnvAction::Select);
        assert_eq!(last_spec(&pr).render_args(), "workspace select prod");
    }

    #[tokio::test]
    async fn test_change_runner_trims_name() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new());
        let runner = EnvChangeRunner::new(EnvAction::New, fs, env, pr.clone());

        runner.run(&EnvSettings::new(), "  staging \n").await.unwrap();

        assert_eq!(last_spec(&pr).render_args(), "workspace new staging");
    }

    #[tokio::test]
    async fn test_change_runner_rejects_blank_name() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new());
        let runner = EnvChangeRunner::new(EnvAction::Delete, fs, env, pr.clone());

        let err = runner.run(&EnvSettings::new(), "   ").await.unwrap_err();
        match err {
            TerraformError::InvalidWorkspaceName(ref name) => assert_eq!(name, "   "),
            ref other => panic!("expected InvalidWorkspaceName, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Terraform: Invalid workspace name '   '.");
        assert!(pr.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_change_runner_propagates_exit_code() {
        let (fs, env, pr) = linux_collaborators(FakeProcessRunner::new().with_exit_code(1));
        let runner = EnvChangeRunner::new(EnvAction::Delete, fs, env, pr);

        let err = runner
            .run(&EnvSettings::new().with_force(true), "old")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Terraform: Process returned an error (exit code 1)."
        );
    }
}
