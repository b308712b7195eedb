//! `lisa sitemap` command implementation.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use lisa_content::ContentStore;
use lisa_server::sitemap::{render_sitemap, sitemap_entries};

use crate::commands::{load_config, load_route_table};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    /// Path to configuration file (default: auto-discover lisa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(long)]
    contents_dir: Option<PathBuf>,
}

impl SitemapArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(self.config, self.contents_dir)?;
        let table = load_route_table(&config)?;
        let content = ContentStore::new(config.content_resolved.contents_dir.clone());

        let entries = sitemap_entries(&table, &content, &config.site.base_url, Utc::now());
        let xml = render_sitemap(&entries)?;
        output.print(&xml)?;
        output.info(&format!("{} URLs", entries.len()));
        Ok(())
    }
}
