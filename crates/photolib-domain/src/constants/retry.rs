//! Retry/backoff constants for calls to unreliable external providers
//! (vision, edit, point-cloud, reasoning services).

/// Maximum number of attempts (including the first) for a retried call.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
/// Initial backoff delay before the first retry.
pub const RETRY_INITIAL_BACKOFF_MS: u64 = 250;
/// Multiplier applied to the backoff delay after each failed attempt.
pub const RETRY_BACKOFF_MULTIPLIER: f64 = 2.0;
/// Ceiling on the backoff delay, regardless of attempt count.
pub const RETRY_MAX_BACKOFF_MS: u64 = 4_000;
