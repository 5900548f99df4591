//! One module per resource family, each exposing an Axum sub-router merged
//! by [`crate::transport::axum_http::build_router`].

pub mod admin;
pub mod agent;
pub mod images;
pub mod pointcloud;
pub mod recommend;
pub mod search;
pub mod sessions;
pub mod tools;
