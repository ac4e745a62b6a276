use serde::Serialize;

use crate::error::TerraformError;
use crate::host::ExecutionResult;

/// Prefix Terraform prints in front of the currently selected workspace.
const CURRENT_MARKER: char = '*';

/// Workspace names parsed from `terraform workspace list` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentList {
    workspaces: Vec<String>,
    current: Option<String>,
}

impl EnvironmentList {
    /// Parses output lines, one name per line. Whitespace and the leading
    /// selection marker are stripped; blank lines are dropped.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut workspaces = Vec::new();
        let mut current = None;

        for line in lines {
            let trimmed = line.as_ref().trim();
            let (name, selected) = match trimmed.strip_prefix(CURRENT_MARKER) {
                Some(rest) => (rest.trim(), true),
                None => (trimmed, false),
            };
            if name.is_empty() {
                continue;
            }
            if selected && current.is_none() {
                current = Some(name.to_string());
            }
            workspaces.push(name.to_string());
        }

        Self {
            workspaces,
            current,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.workspaces
    }

    /// The workspace Terraform marked as selected, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workspaces.iter().any(|w| w == name)
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.workspaces.iter()
    }
}

impl TryFrom<&ExecutionResult> for EnvironmentList {
    type Error = TerraformError;

    /// Fails only when stdout is not UTF-8.
    fn try_from(result: &ExecutionResult) -> Result<Self, Self::Error> {
        Ok(Self::parse(result.lines()?.as_slice()))
    }
}

impl IntoIterator for EnvironmentList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.workspaces.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnvironmentList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.workspaces.iter()
    }
}
