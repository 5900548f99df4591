//! Reasoning engine provider implementations.

pub mod http;

pub use http::HttpReasoningProvider;
