//! Terraform workspace commands: executable lookup, argument building,
//! execution and output parsing.

mod locator;
mod runner;
mod settings;
mod tool;
mod workspace;

pub use locator::{executable_name, locate, path_separator};
pub use runner::{EnvAction, EnvChangeRunner, EnvListRunner, change_arguments, list_arguments};
pub use settings::{EnvCommand, EnvSettings, ToolSettings};
pub use workspace::EnvironmentList;
