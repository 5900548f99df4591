//! Transport layer: the Axum HTTP surface and the MCP protocol surface,
//! both driven by the same [`photolib_infrastructure::di::AppContext`].
//!
//! The HTTP surface (`transport::axum_http`) is the library's primary
//! interface and covers every operation in the external API; the MCP
//! surface (`transport::mcp`) exposes the same tool catalogue to MCP
//! clients, mounted alongside it or served standalone over stdio.

pub mod error;
pub mod init;
pub mod routes;
pub mod state;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use init::run;
pub use state::AppState;
