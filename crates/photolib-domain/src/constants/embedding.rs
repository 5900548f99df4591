//! Embedding dimension constants for each supported provider and model family.

/// `FastEmbed` default multimodal (CLIP) model dimension.
pub const EMBEDDING_DIMENSION_FASTEMBED_CLIP: usize = 512;
/// `FastEmbed` text-only MiniLM-L6-v2 fallback dimension.
pub const EMBEDDING_DIMENSION_FASTEMBED_MINILM: usize = 384;
/// Remote embedding provider default dimension when the server does not advertise one.
pub const EMBEDDING_DIMENSION_REMOTE_DEFAULT: usize = 1024;
/// System-wide default embedding dimension, used until a provider is configured.
pub const EMBEDDING_DIMENSION_DEFAULT: usize = 512;

/// Maximum number of inputs accepted in a single `embed_batch` call.
pub const EMBEDDING_MAX_BATCH_SIZE: usize = 64;

/// Instruction used for indexing-time embeddings. Per `SPEC_FULL.md` open
/// question 1, the same instruction is reused for text and image queries so
/// all vectors share one space.
pub const EMBEDDING_INDEXING_INSTRUCTION: &str = "Represent this image for retrieval.";
/// Instruction used for text queries; identical to the indexing instruction.
pub const EMBEDDING_TEXT_QUERY_INSTRUCTION: &str = EMBEDDING_INDEXING_INSTRUCTION;
/// Instruction used for image queries; identical to the indexing instruction.
pub const EMBEDDING_IMAGE_QUERY_INSTRUCTION: &str = EMBEDDING_INDEXING_INSTRUCTION;

/// Tolerance for the unit-length invariant on normalised embedding vectors.
pub const EMBEDDING_NORMALIZATION_EPSILON: f32 = 1e-3;
