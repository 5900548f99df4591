//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the semantic photo library service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Outbound HTTP request error
    #[error("HTTP error: {source}")]
    Http {
        /// The underlying HTTP client error
        #[from]
        source: reqwest::Error,
    },

    /// A caller-supplied argument failed validation.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input
        message: String,
    },

    /// No text and no image were supplied where at least one is required.
    #[error("Empty input: at least one of text or image must be provided")]
    EmptyInput,

    /// A requested resource does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// The caller is not authenticated against the relevant service.
    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        /// Description of the authentication failure
        message: String,
    },

    /// The service is misconfigured (missing or invalid configuration value).
    #[error("Misconfigured: {message}")]
    Misconfigured {
        /// Description of the misconfiguration
        message: String,
    },

    /// A downstream provider (embedding, vector store, vision, point-cloud) is unavailable.
    #[error("Provider unavailable: {provider}: {message}")]
    ProviderUnavailable {
        /// Name of the unavailable provider
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// An operation exceeded its allotted time budget.
    #[error("Timed out after {duration_ms}ms: {operation}")]
    TimedOut {
        /// The operation that timed out
        operation: String,
        /// How long the operation ran before timing out
        duration_ms: u64,
    },

    /// A downstream provider rejected the request due to rate limiting.
    #[error("Rate limited by {provider}, retry after {retry_after_ms:?}ms")]
    RateLimited {
        /// Name of the provider that rate-limited the request
        provider: String,
        /// Suggested retry delay, if the provider supplied one
        retry_after_ms: Option<u64>,
    },

    /// A vector's dimensionality did not match the collection's configured dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the collection was configured with
        expected: usize,
        /// Dimension actually produced
        actual: usize,
    },

    /// A stored or transmitted payload could not be decoded.
    #[error("Corrupt payload: {message}")]
    CorruptPayload {
        /// Description of the corruption
        message: String,
    },

    /// A destructive operation was attempted without the required confirmation.
    #[error("Not confirmed: {operation} requires explicit confirmation")]
    NotConfirmed {
        /// The operation that required confirmation
        operation: String,
    },

    /// Catch-all for conditions that should never happen in correct operation.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an unauthenticated error
    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a misconfigured error
    pub fn misconfigured<S: Into<String>>(message: S) -> Self {
        Self::Misconfigured {
            message: message.into(),
        }
    }

    /// Create a provider-unavailable error
    pub fn provider_unavailable<S: Into<String>, M: Into<String>>(provider: S, message: M) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a timed-out error
    pub fn timed_out<S: Into<String>>(operation: S, duration_ms: u64) -> Self {
        Self::TimedOut {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Create a rate-limited error
    pub fn rate_limited<S: Into<String>>(provider: S, retry_after_ms: Option<u64>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            retry_after_ms,
        }
    }

    /// Create a dimension-mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a corrupt-payload error
    pub fn corrupt_payload<S: Into<String>>(message: S) -> Self {
        Self::CorruptPayload {
            message: message.into(),
        }
    }

    /// Create a not-confirmed error
    pub fn not_confirmed<S: Into<String>>(operation: S) -> Self {
        Self::NotConfirmed {
            operation: operation.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_carries_both_sizes() {
        let err = Error::dimension_mismatch(512, 384);
        match err {
            Error::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 512);
                assert_eq!(actual, 384);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn not_confirmed_message_names_the_operation() {
        let err = Error::not_confirmed("delete_image");
        assert!(err.to_string().contains("delete_image"));
    }
}
