//! Search and ranking constants.

/// Default number of results returned by a search when the caller does not specify a limit.
pub const SEARCH_DEFAULT_LIMIT: usize = 20;
/// Maximum number of results a single search request may return.
pub const SEARCH_MAX_LIMIT: usize = 200;
/// Over-fetch multiplier applied when a date filter will be used to narrow
/// vector-store results after the similarity search itself.
pub const SEARCH_OVERFETCH_MULTIPLIER: usize = 3;
