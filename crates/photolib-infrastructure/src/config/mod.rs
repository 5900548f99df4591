//! Layered, validated configuration (TOML + environment overrides).
//!
//! [`AppConfig`] mirrors the provider-facing config shapes in
//! `photolib_domain::registry::*`: each section here carries exactly the
//! fields its provider's `*ProviderConfig` understands, plus the `provider`
//! selector. Loading goes through `figment`, layering a TOML file (if given)
//! under environment variables prefixed `PHOTOLIB_` (double-underscore
//! nested, e.g. `PHOTOLIB_EMBEDDING__PROVIDER=remote`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use photolib_domain::error::{Error, Result};
use photolib_domain::registry::{
    CacheProviderConfig, EditProviderConfig, EmbeddingProviderConfig, EventBusProviderConfig,
    ObjectStoreProviderConfig, PointCloudProviderConfig,
    ReasoningProviderConfig, TaskRunnerProviderConfig, VectorStoreProviderConfig,
    VisionProviderConfig,
};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PHOTOLIB_";

/// Top-level application configuration, deserialized from TOML + environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server binding.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging/tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Object (photo) storage.
    #[serde(default)]
    pub object_store: ObjectStoreSection,
    /// Vector index storage.
    #[serde(default)]
    pub vector_store: VectorStoreSection,
    /// Embedding model selection.
    #[serde(default)]
    pub embedding: EmbeddingSection,
    /// Vision (multimodal understanding) model.
    #[serde(default)]
    pub vision: HttpModelSection,
    /// Image edit model.
    #[serde(default)]
    pub edit: HttpModelSection,
    /// 3D point-cloud reconstruction service.
    #[serde(default)]
    pub pointcloud: PointCloudSection,
    /// Reasoning (tool-calling) model backing the agent orchestrator.
    /// Absent/empty `base_url` means the orchestrator falls back to its
    /// rule-based intent resolver.
    #[serde(default)]
    pub reasoning: ReasoningSection,
    /// In-memory metadata cache fronting the object store.
    #[serde(default)]
    pub cache: CacheSection,
    /// Event bus transport.
    #[serde(default)]
    pub events: EventsSection,
    /// Background task runner.
    #[serde(default)]
    pub task_runner: GenericProviderSection,
    /// Conversational agent orchestrator tuning.
    #[serde(default)]
    pub agent: AgentSection,
    /// Collection name the vector store indexes images under.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            object_store: ObjectStoreSection::default(),
            vector_store: VectorStoreSection::default(),
            embedding: EmbeddingSection::default(),
            vision: HttpModelSection::default(),
            edit: HttpModelSection::default(),
            pointcloud: PointCloudSection::default(),
            reasoning: ReasoningSection::default(),
            cache: CacheSection::default(),
            events: EventsSection::default(),
            task_runner: GenericProviderSection { provider: "tokio".to_owned(), extra: HashMap::new() },
            agent: AgentSection::default(),
            collection: default_collection(),
        }
    }
}

fn default_collection() -> String {
    "photos".to_owned()
}

/// Axum server bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_owned(), port: 8080 }
    }
}

/// Tracing/log output tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"photolib=debug,warn"`.
    pub level: String,
    /// When set, logs are additionally written (rolling daily) under this directory.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), dir: None }
    }
}

/// Photo object storage section (bridges to [`ObjectStoreProviderConfig`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreSection {
    /// Registered provider name, e.g. `"filesystem"`.
    pub provider: String,
    /// Root directory photos are stored under.
    pub root: Option<PathBuf>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for ObjectStoreSection {
    fn default() -> Self {
        Self { provider: "filesystem".to_owned(), root: Some(PathBuf::from("./data/images")), extra: HashMap::new() }
    }
}

impl From<ObjectStoreSection> for ObjectStoreProviderConfig {
    fn from(section: ObjectStoreSection) -> Self {
        let mut config = ObjectStoreProviderConfig::new(section.provider);
        if let Some(root) = section.root {
            config = config.with_root(root);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Vector index storage section (bridges to [`VectorStoreProviderConfig`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreSection {
    /// Registered provider name: `"local-file"` or `"qdrant"`.
    pub provider: String,
    /// Local-file data directory, or Qdrant base URL.
    pub uri: Option<String>,
    /// Authentication token (Qdrant).
    pub api_key: Option<String>,
    /// Embedding dimensionality, when known ahead of the first `initialize`.
    pub dimensions: Option<usize>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for VectorStoreSection {
    fn default() -> Self {
        Self { provider: "local-file".to_owned(), uri: Some("./data/vector_store".to_owned()), api_key: None, dimensions: None, extra: HashMap::new() }
    }
}

impl From<VectorStoreSection> for VectorStoreProviderConfig {
    fn from(section: VectorStoreSection) -> Self {
        let mut config = VectorStoreProviderConfig::new(section.provider);
        if let Some(uri) = section.uri {
            config = config.with_uri(uri);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(dimensions) = section.dimensions {
            config = config.with_dimensions(dimensions);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Embedding provider section (bridges to [`EmbeddingProviderConfig`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSection {
    /// Registered provider name: `"local"` or `"remote"`.
    pub provider: String,
    /// Model identifier, provider-specific.
    pub model: Option<String>,
    /// API key, required by `"remote"`.
    pub api_key: Option<String>,
    /// Base URL, required by `"remote"`.
    pub base_url: Option<String>,
    /// Target embedding dimensionality, used by `"remote"`.
    pub dimensions: Option<usize>,
    /// On-disk weights cache directory, used by `"local"`.
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for EmbeddingSection {
    fn default() -> Self {
        Self { provider: "local".to_owned(), model: None, api_key: None, base_url: None, dimensions: None, cache_dir: None, extra: HashMap::new() }
    }
}

impl From<EmbeddingSection> for EmbeddingProviderConfig {
    fn from(section: EmbeddingSection) -> Self {
        let mut config = EmbeddingProviderConfig::new(section.provider);
        if let Some(model) = section.model {
            config = config.with_model(model);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(base_url) = section.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(dimensions) = section.dimensions {
            config = config.with_dimensions(dimensions);
        }
        if let Some(cache_dir) = section.cache_dir {
            config = config.with_cache_dir(cache_dir);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Shared shape for the vision, edit and reasoning HTTP-backed model sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpModelSection {
    /// Registered provider name, currently always `"http"`.
    pub provider: String,
    /// Base URL of the remote model API.
    pub base_url: Option<String>,
    /// API key, if the endpoint requires one.
    pub api_key: Option<String>,
    /// Model name/identifier.
    pub model: Option<String>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for HttpModelSection {
    fn default() -> Self {
        Self { provider: "http".to_owned(), base_url: None, api_key: None, model: None, extra: HashMap::new() }
    }
}

impl From<HttpModelSection> for VisionProviderConfig {
    fn from(section: HttpModelSection) -> Self {
        let mut config = VisionProviderConfig::new(section.provider);
        if let Some(base_url) = section.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(model) = section.model {
            config = config.with_model(model);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

impl From<HttpModelSection> for EditProviderConfig {
    fn from(section: HttpModelSection) -> Self {
        let mut config = EditProviderConfig::new(section.provider);
        if let Some(base_url) = section.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(model) = section.model {
            config = config.with_model(model);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

impl From<HttpModelSection> for ReasoningProviderConfig {
    fn from(section: HttpModelSection) -> Self {
        let mut config = ReasoningProviderConfig::new(section.provider);
        if let Some(base_url) = section.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(model) = section.model {
            config = config.with_model(model);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Reasoning model section: identical shape to [`HttpModelSection`], kept as
/// its own alias so an absent `base_url` reads as an explicit, named "no
/// reasoning model configured" state rather than an overloaded default.
pub type ReasoningSection = HttpModelSection;

/// Point-cloud generation service section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudSection {
    /// Registered provider name, currently always `"http"`.
    pub provider: String,
    /// Base URL of the external 3D reconstruction service.
    pub base_url: Option<String>,
    /// API key, if the endpoint requires one.
    pub api_key: Option<String>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for PointCloudSection {
    fn default() -> Self {
        Self { provider: "http".to_owned(), base_url: None, api_key: None, extra: HashMap::new() }
    }
}

impl From<PointCloudSection> for PointCloudProviderConfig {
    fn from(section: PointCloudSection) -> Self {
        let mut config = PointCloudProviderConfig::new(section.provider);
        if let Some(base_url) = section.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(api_key) = section.api_key {
            config = config.with_api_key(api_key);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Metadata cache fronting the object store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSection {
    /// Registered provider name, currently always `"moka"`.
    pub provider: String,
    /// Maximum number of cached entries.
    pub max_size: Option<usize>,
    /// Entry time-to-live, in seconds.
    pub ttl_secs: Option<u64>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self { provider: "moka".to_owned(), max_size: Some(10_000), ttl_secs: Some(300), extra: HashMap::new() }
    }
}

impl From<CacheSection> for CacheProviderConfig {
    fn from(section: CacheSection) -> Self {
        let mut config = CacheProviderConfig::new(section.provider);
        if let Some(max_size) = section.max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(ttl_secs) = section.ttl_secs {
            config = config.with_ttl_secs(ttl_secs);
        }
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Event bus transport section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsSection {
    /// Registered provider name, currently always `"inprocess"`.
    pub provider: String,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self { provider: "inprocess".to_owned(), extra: HashMap::new() }
    }
}

impl From<EventsSection> for EventBusProviderConfig {
    fn from(section: EventsSection) -> Self {
        let mut config = EventBusProviderConfig::new(section.provider);
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Bare `{provider, extra}` section for providers with no dedicated fields
/// (task runner, filesystem access).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericProviderSection {
    /// Registered provider name.
    pub provider: String,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl From<GenericProviderSection> for TaskRunnerProviderConfig {
    fn from(section: GenericProviderSection) -> Self {
        let mut config = TaskRunnerProviderConfig::new(section.provider);
        for (k, v) in section.extra {
            config = config.with_extra(k, v);
        }
        config
    }
}

/// Conversational agent orchestrator tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Maximum ReAct loop iterations per turn.
    pub max_iterations: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self { max_iterations: photolib_domain::constants::values::ORCHESTRATOR_DEFAULT_MAX_ITERATIONS }
    }
}

impl AppConfig {
    /// Loads configuration by layering `path` (if it exists) under
    /// `PHOTOLIB_`-prefixed environment variables, falling back to
    /// [`AppConfig::default`] for anything neither source sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::misconfigured`] if the merged configuration cannot be
    /// deserialized (e.g. a malformed TOML file or a type mismatch in an
    /// environment override).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().map_err(|e| Error::misconfigured(format!("failed to load configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_config_file() {
        let config = AppConfig::load(None).expect("defaults must be self-sufficient");
        assert_eq!(config.embedding.provider, "local");
        assert_eq!(config.object_store.provider, "filesystem");
        assert_eq!(config.collection, "photos");
    }

    #[test]
    fn env_overrides_take_precedence() {
        // Test-local env var; not read by any other test in this binary.
        std::env::set_var("PHOTOLIB_EMBEDDING__PROVIDER", "remote");
        std::env::set_var("PHOTOLIB_EMBEDDING__BASE_URL", "https://example.test");
        let config = AppConfig::load(None).expect("env overrides must merge cleanly");
        assert_eq!(config.embedding.provider, "remote");
        assert_eq!(config.embedding.base_url.as_deref(), Some("https://example.test"));
        std::env::remove_var("PHOTOLIB_EMBEDDING__PROVIDER");
        std::env::remove_var("PHOTOLIB_EMBEDDING__BASE_URL");
    }
}
