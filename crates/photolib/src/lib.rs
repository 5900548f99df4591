//! # photolib
//!
//! CLI entry point and process wiring for the semantic photo library
//! service. This crate just parses arguments and hands off to
//! [`photolib_server::run`]; the actual HTTP and MCP surfaces live in
//! `photolib-server`, domain types in `photolib-domain`.
//!
//! ## Architecture
//!
//! - `photolib-domain` - entities, ports, domain errors
//! - `photolib-application` - use cases orchestrating domain ports
//! - `photolib-infrastructure` - config, logging, DI bootstrap
//! - `photolib-providers` - concrete provider adapters (linkme-registered)
//! - `photolib-server` - HTTP + MCP transport, this crate's entry point

use std::path::PathBuf;

use clap::Parser;

/// Command line interface for the photolib service.
#[derive(Parser, Debug)]
#[command(name = "photolib")]
#[command(about = "Semantic photo library service")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file. Falls back to
    /// `$XDG_CONFIG_HOME/photolib/config.toml` when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serve the MCP surface over stdio instead of starting the HTTP server.
    /// For desktop MCP clients that launch this binary as a subprocess.
    #[arg(long)]
    pub stdio: bool,
}

impl Cli {
    fn resolved_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("photolib").join("config.toml"))
}

/// Runs the service per the parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if configuration loading, logging setup, DI bootstrap,
/// or the chosen transport's serve loop fails.
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.resolved_config_path();
    photolib_server::run(config_path.as_deref(), cli.stdio).await.map_err(|e| e.into())
}
