mod cli;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, WorkspaceCommand};
use tfws::host::{SystemEnvironment, SystemFileSystem, TokioProcessRunner};
use tfws::output;
use tfws::terraform::{EnvAction, EnvChangeRunner, EnvListRunner, EnvSettings};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        WorkspaceCommand::List(args) => {
            let runner = EnvListRunner::new(
                Arc::new(SystemFileSystem),
                Arc::new(SystemEnvironment),
                Arc::new(TokioProcessRunner),
            );
            let workspaces = runner.run(&cli.settings(&args.extra)).await?;
            print!("{}", output::render(&workspaces, args.format)?);
        }
        WorkspaceCommand::New(args) => {
            change(EnvAction::New, &cli.settings(&args.extra), &args.name).await?;
        }
        WorkspaceCommand::Select(args) => {
            change(EnvAction::Select, &cli.settings(&args.extra), &args.name).await?;
        }
        WorkspaceCommand::Delete(args) => {
            let settings = cli.settings(&args.extra).with_force(args.force);
            change(EnvAction::Delete, &settings, &args.name).await?;
        }
    }

    Ok(())
}

async fn change(action: EnvAction, settings: &EnvSettings, name: &str) -> Result<()> {
    let runner = EnvChangeRunner::new(
        action,
        Arc::new(SystemFileSystem),
        Arc::new(SystemEnvironment),
        Arc::new(TokioProcessRunner),
    );
    runner.run(settings, name).await?;
    Ok(())
}
