use std::path::{Path, PathBuf};

use super::settings::EnvSettings;
use crate::error::TerraformError;
use crate::host::{Environment, FileSystem, PlatformFamily};

const TOOLS_DIRECTORY: &str = "tools";

/// `PATH` entry separator for the given platform family.
pub fn path_separator(family: PlatformFamily) -> char {
    if family.is_windows() { ';' } else { ':' }
}

pub fn executable_name(family: PlatformFamily) -> &'static str {
    if family.is_windows() {
        "terraform.exe"
    } else {
        "terraform"
    }
}

/// Resolves the Terraform executable.
///
/// Search order: the explicit tool path (returned verbatim), the `tools`
/// directory under the working directory, then each `PATH` entry.
pub fn locate(
    settings: &EnvSettings,
    file_system: &dyn FileSystem,
    environment: &dyn Environment,
) -> Result<PathBuf, TerraformError> {
    if let Some(tool_path) = settings.tool_path.as_deref() {
        if file_system.exists(tool_path) {
            tracing::debug!(path = %tool_path.display(), "using configured terraform path");
            return Ok(tool_path.to_path_buf());
        }
        tracing::warn!(
            path = %tool_path.display(),
            "configured terraform path does not exist, searching default locations"
        );
    }

    let family = environment.platform_family();
    let name = executable_name(family);

    let candidate = settings
        .tool
        .resolve_working_directory(environment)
        .join(TOOLS_DIRECTORY)
        .join(name);
    if file_system.exists(&candidate) {
        tracing::debug!(path = %candidate.display(), "found terraform in tools directory");
        return Ok(candidate);
    }

    if let Some(search_path) = environment.variable("PATH") {
        for dir in search_path.split(path_separator(family)) {
            if dir.is_empty() {
                continue;
            }
            let candidate = Path::new(dir).join(name);
            if file_system.exists(&candidate) {
                tracing::debug!(path = %candidate.display(), "found terraform on PATH");
                return Ok(candidate);
            }
        }
    }

    Err(TerraformError::ToolNotFound)
}
