//! Transport-layer adapters: the Axum HTTP surface and the MCP protocol
//! surface over the same [`photolib_infrastructure::di::AppContext`].

pub mod axum_http;
pub mod mcp;
