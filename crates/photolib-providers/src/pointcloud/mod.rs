//! Point-cloud generation provider implementations.

pub mod http;

pub use http::HttpPointCloudProvider;
