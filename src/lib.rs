//! TFWS - Terraform workspace tooling
//!
//! A library for locating the Terraform executable, running its workspace
//! sub-commands and parsing the listed workspace names.

pub mod host;
pub mod output;
pub mod terraform;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

mod error;

pub use error::TerraformError;
pub use host::{ExecutionResult, PlatformFamily};
pub use terraform::{EnvCommand, EnvListRunner, EnvSettings, EnvironmentList};
