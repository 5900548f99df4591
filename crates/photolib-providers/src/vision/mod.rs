//! Vision model provider implementations.

pub mod http;

pub use http::HttpVisionProvider;
