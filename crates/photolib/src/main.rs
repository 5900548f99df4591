//! photolib - Entry point
//!
//! Binary entry point for the semantic photo library service. Lives in this
//! facade crate to avoid the doc output filename collision between a binary
//! and a library crate sharing a name (cargo issue #6313).

// Force-link photolib-providers so its linkme inventory registrations run.
extern crate photolib_providers;

use clap::Parser;
use photolib::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    photolib::run(cli).await
}
