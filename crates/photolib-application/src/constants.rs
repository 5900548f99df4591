//! Application layer constants.
//!
//! Most constants live in `photolib_domain::constants`; this module only
//! holds values specific to how this layer wires use cases together.

/// Default vector store collection name, used when no collection is
/// configured explicitly for indexing/search/deletion.
pub const DEFAULT_COLLECTION_NAME: &str = "photos";
