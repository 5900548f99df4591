//! Cross-crate utility modules for the photolib workspace.

/// Filesystem utilities.
pub mod fs;
/// ID generation, deterministic correlation (UUID v5), and content hashing.
pub mod id;
/// Error-detail logging level parsing.
pub mod logging;
/// Naming convention checks (`CamelCase`, `snake_case`, `SCREAMING_SNAKE_CASE`).
pub mod naming;
/// Canonical path utilities — strict, no fallbacks.
pub mod path;
/// Text utilities: MCP content extraction, date/query splitting.
pub mod text;
/// Canonical time utilities — strict, no fallbacks.
pub mod time;

pub use fs::find_files_by_extensions;
pub use id::{compute_content_hash, compute_file_hash, correlate_id, mask_id};
pub use naming::{
    get_suffix, is_camel_case, is_screaming_snake_case, is_snake_case, split_camel_case,
};
pub use text::{extract_text, extract_text_with_sep, split_date_and_query};
