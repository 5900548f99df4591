//! Process entry point: loads configuration, wires logging, bootstraps the
//! DI container and starts whichever transport was asked for.
//!
//! Two transport modes:
//!
//! - HTTP (default): the full REST surface plus the MCP surface mounted at
//!   `/mcp`, served over `axum`.
//! - Stdio: the MCP surface only, over stdin/stdout, for desktop MCP clients
//!   that launch the binary as a subprocess rather than dialing it over HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use photolib_infrastructure::config::AppConfig;
use photolib_infrastructure::di::init_app;
use photolib_infrastructure::logging::{init_logging, LoggingGuard};
use tracing::info;

use crate::transport::{axum_http, mcp};

/// Loads config and logging, bootstraps the DI container, and runs the
/// requested transport until shutdown.
///
/// # Errors
///
/// Returns an error if config loading, logging setup, DI bootstrap, or the
/// transport's own serve loop fails.
pub async fn run(config_path: Option<&Path>, stdio: bool) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)?;
    // Held for the process lifetime: dropping it stops flushing the file appender.
    let _logging_guard: LoggingGuard = init_logging(&config.logging.level, config.logging.dir.as_deref())?;

    info!(host = %config.server.host, port = config.server.port, stdio, "starting photolib");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server bind address {}:{}: {e}", config.server.host, config.server.port))?;

    let ctx = Arc::new(init_app(config).await?);

    if stdio {
        mcp::serve_stdio(ctx).await
    } else {
        let router = axum_http::build_router(ctx);
        axum_http::serve(addr, router).await.map_err(Into::into)
    }
}
