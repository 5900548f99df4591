//! Shared Axum router state: a handle to the composed [`AppContext`].

use std::sync::Arc;

use photolib_infrastructure::di::AppContext;

/// Cloneable handle every route handler extracts via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
}

impl AppState {
    /// Wraps an already-built [`AppContext`].
    #[must_use]
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}
