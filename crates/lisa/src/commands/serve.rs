//! `lisa serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use lisa_config::{CliSettings, Config};
use lisa_server::{run_server, server_config_from_lisa_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover lisa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(long, env = "LISA_CONTENTS_DIR")]
    contents_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Public base URL used in canonical links and the sitemap (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output (request and content logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            contents_dir: self.contents_dir,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Contents directory: {}",
            config.content_resolved.contents_dir.display()
        ));
        output.info(&format!("Base URL: {}", config.site.base_url));

        match &config.content_resolved.routes_file {
            Some(path) => output.info(&format!("Routes: {}", path.display())),
            None => output.info("Routes: built-in"),
        }

        if let Some(public_dir) = &config.content_resolved.public_dir {
            output.info(&format!("Public directory: {}", public_dir.display()));
        } else {
            output.warning("Static files: disabled (no public_dir in config)");
        }

        let server_config = server_config_from_lisa_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
