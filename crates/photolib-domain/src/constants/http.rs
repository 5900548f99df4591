//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! HTTP constants -- Single Source of Truth

/// MIME type for JSON content
pub const CONTENT_TYPE_JSON: &str = "application/json";
