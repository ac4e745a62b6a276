use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tfws::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the terraform executable
    #[arg(long, global = true, env = "TFWS_TERRAFORM_PATH")]
    pub terraform: Option<PathBuf>,

    /// Directory terraform runs in
    #[arg(long, global = true, env = "TFWS_WORKING_DIR")]
    pub chdir: Option<PathBuf>,

    /// Use the deprecated `env` keyword instead of `workspace`
    #[arg(long, global = true)]
    pub legacy_env: bool,

    #[command(subcommand)]
    pub command: WorkspaceCommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommand {
    List(ListArgs),
    New(NameArgs),
    Select(NameArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Extra arguments passed through to terraform
    #[arg(last = true)]
    pub extra: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct NameArgs {
    pub name: String,

    #[arg(last = true)]
    pub extra: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    pub name: String,

    /// Delete even if the workspace still tracks resources
    #[arg(long)]
    pub force: bool,

    #[arg(last = true)]
    pub extra: Vec<String>,
}
