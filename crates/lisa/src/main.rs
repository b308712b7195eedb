//! LiSA CLI - website and documentation server.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP server
//! - `routes`: Print the flattened documentation routes
//! - `check`: Validate routes and content coverage
//! - `sitemap`: Print the sitemap XML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RoutesArgs, ServeArgs, SitemapArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// LiSA - website and documentation server.
#[derive(Parser)]
#[command(name = "lisa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Print the flattened documentation routes.
    Routes(RoutesArgs),
    /// Validate the route tree and content files.
    Check(CheckArgs),
    /// Print sitemap.xml to stdout.
    Sitemap(SitemapArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Routes(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Sitemap(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
