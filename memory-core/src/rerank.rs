//! Cross-encoder reranking and LLM classification/extraction collaborator traits.
//!
//! These are the external-service seams named in §6: a cross-encoder
//! reranker and an LLM service. The core depends on the capability, not a
//! specific vendor, so callers provide an implementation (HTTP client to
//! OpenRouter/Voyage/etc., or a local model) satisfying these traits.

use crate::Result;
use async_trait::async_trait;

/// One scored candidate returned by a cross-encoder rerank call.
#[derive(Debug, Clone)]
pub struct RerankResult {
    /// Index into the `documents` slice passed to [`CrossEncoderReranker::rerank`].
    pub index: usize,
    /// Relevance score, typically in `[0,1]`.
    pub score: f32,
}

/// `(query, documents[], topK) → [{index, score}]` (§6).
#[async_trait]
pub trait CrossEncoderReranker: Send + Sync {
    /// Score `documents` against `query`, returning the top `top_k` by score.
    ///
    /// # Errors
    ///
    /// Returns an error if the reranker call fails.
    async fn rerank(&self, query: &str, documents: &[String], top_k: usize) -> Result<Vec<RerankResult>>;
}

/// `{type, confidence}` classification for a single entity name (§4.6 tier 3).
#[derive(Debug, Clone)]
pub struct EntityTypeClassification {
    pub entity_type: String,
    pub confidence: f32,
}

/// Single-entity or batched LLM classifier for entity types (§4.6).
#[async_trait]
pub trait EntityTypeLlm: Send + Sync {
    /// Classify one entity name, in context, via an LLM JSON prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM call fails or the response is malformed;
    /// callers degrade to the heuristic tiebreak on error (§4.6).
    async fn classify(&self, name: &str, context_excerpt: &str) -> Result<EntityTypeClassification>;
}

/// `{entities:[{name,type,confidence}]}` extraction over a content excerpt (§4.5 LLM path).
#[derive(Debug, Clone)]
pub struct LlmExtractedEntity {
    pub name: String,
    pub entity_type: String,
    pub confidence: f32,
}

/// LLM-backed entity extraction collaborator (§4.5 path 1).
#[async_trait]
pub trait EntityExtractionLlm: Send + Sync {
    /// Extract entities from the first 2000 characters of content.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed or off-schema JSON; callers degrade to
    /// the regex fallback (§4.5 path 2) on error — this is never fatal.
    async fn extract_entities(&self, content_excerpt: &str) -> Result<Vec<LlmExtractedEntity>>;
}
