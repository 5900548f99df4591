//! Image edit provider implementations.

pub mod http;

pub use http::HttpEditProvider;
