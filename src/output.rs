use clap::ValueEnum;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::terraform::EnvironmentList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One name per line, current workspace marked with `*`
    #[default]
    Text,
    Table,
    Json,
}

#[derive(Tabled)]
struct WorkspaceRow<'a> {
    #[tabled(rename = "CURRENT")]
    current: &'static str,
    #[tabled(rename = "WORKSPACE")]
    name: &'a str,
}

pub fn render(
    workspaces: &EnvironmentList,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(workspaces)),
        OutputFormat::Table => Ok(render_table(workspaces)),
        OutputFormat::Json => serde_json::to_string_pretty(workspaces).map(|json| json + "\n"),
    }
}

fn render_text(workspaces: &EnvironmentList) -> String {
    workspaces
        .iter()
        .map(|name| {
            let marker = if workspaces.current() == Some(name.as_str()) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {name}\n")
        })
        .collect()
}

fn render_table(workspaces: &EnvironmentList) -> String {
    let rows = workspaces.iter().map(|name| WorkspaceRow {
        current: if workspaces.current() == Some(name.as_str()) {
            "*"
        } else {
            ""
        },
        name: name.as_str(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{table}\n")
}
