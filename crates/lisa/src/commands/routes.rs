//! `lisa routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use lisa_site::Page;

use crate::commands::{load_config, load_route_table};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover lisa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON array instead of one route per line.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(self.config, None)?;
        let table = load_route_table(&config)?;

        let text = render_routes(table.pages(), self.json)?;
        output.print(&text)?;
        output.info(&format!("{} pages", table.pages().len()));
        Ok(())
    }
}

/// Route listing as pretty JSON or aligned text lines.
fn render_routes(pages: &[Page], json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(pages)?)
    } else {
        Ok(format_routes(pages))
    }
}

/// One `href  title` line per page, hrefs aligned.
fn format_routes(pages: &[Page]) -> String {
    let width = pages.iter().map(|p| p.href.len()).max().unwrap_or(0);
    pages
        .iter()
        .map(|page| format!("{:<width$}  {}", page.href, page.title))
        .collect::<Vec<_>>()
        .join("\n")
}
