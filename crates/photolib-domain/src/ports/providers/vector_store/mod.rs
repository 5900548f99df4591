//! Vector store provider port.

mod provider;

pub use provider::{CollectionInfo, VectorFilter, VectorStoreProvider};
