//! Merges every resource router into the service's one Axum [`Router`] and
//! drives the listen loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use photolib_infrastructure::di::AppContext;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use crate::transport::mcp;

/// Builds the full HTTP surface over an already-wired [`AppContext`]: every
/// REST route plus the MCP surface nested at `/mcp`.
#[must_use]
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let state = AppState::new(ctx.clone());

    let rest = Router::new()
        .merge(routes::images::router())
        .merge(routes::search::router())
        .merge(routes::agent::router())
        .merge(routes::tools::router())
        .merge(routes::pointcloud::router())
        .merge(routes::recommend::router())
        .merge(routes::sessions::router())
        .merge(routes::admin::router())
        .with_state(state);

    rest.merge(mcp::router(ctx)).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}

/// Binds `addr` and serves `router` until the process receives a shutdown
/// signal (ctrl-c, or SIGTERM on unix).
///
/// # Errors
///
/// Returns an error if the socket can't be bound or the server loop fails.
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "photolib HTTP surface listening");
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed installing Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).expect("failed installing SIGTERM handler").recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
