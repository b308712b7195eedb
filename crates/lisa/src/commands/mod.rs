//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod routes;
pub(crate) mod serve;
pub(crate) mod sitemap;

pub(crate) use check::CheckArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use sitemap::SitemapArgs;

use std::path::PathBuf;

use lisa_config::{CliSettings, Config};
use lisa_site::{RouteTable, load_route_tree};

use crate::error::CliError;

/// Load configuration with an optional contents directory override.
pub(crate) fn load_config(
    config_path: Option<PathBuf>,
    contents_dir: Option<PathBuf>,
) -> Result<Config, CliError> {
    let cli_settings = CliSettings {
        contents_dir,
        ..CliSettings::default()
    };
    Ok(Config::load(config_path.as_deref(), Some(&cli_settings))?)
}

/// Build the route table from the configured routes file or the built-in tree.
pub(crate) fn load_route_table(config: &Config) -> Result<RouteTable, CliError> {
    let routes = load_route_tree(config.content_resolved.routes_file.as_deref())?;
    Ok(RouteTable::new(routes))
}
