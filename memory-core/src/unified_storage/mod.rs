//! # Unified Storage Engine (C8, §4.8)
//!
//! Validates and normalizes incoming content, classifies it as a single
//! memory or an oversize mini-document requiring chunking, and persists it
//! across the relational/vector/graph stores as one [`crate::saga::Saga`].

mod cache;

pub use cache::RecentMemoryCache;

use crate::embeddings::{EmbeddingCache, EmbeddingProvider};
use crate::episode_record::{content_length_valid, MemoryItem};
use crate::saga::{Saga, SagaCoordinator, SagaStep};
use crate::storage::{Edge, EdgeKind, GraphStore, RelationalStore, VectorRecord, VectorStore};
use crate::tenant::TenantContext;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Token estimate below which content is stored as a single memory (§4.8).
pub const SINGLE_MEMORY_TOKEN_LIMIT: usize = 500;
/// Characters per chunk when a memory is split into a mini-document (§4.8).
pub const CHUNK_SIZE: usize = 1000;
/// Overlap (in characters) between consecutive chunks (§4.8).
pub const CHUNK_OVERLAP: usize = 100;
/// Similarity score at or above which a `SIMILAR_TO` edge is created (§4.9).
pub const SIMILAR_TO_THRESHOLD: f32 = 0.7;
/// Rough chars-per-token ratio used for the size classification estimate.
const CHARS_PER_TOKEN: usize = 4;

/// Strip control characters and collapse runs of whitespace (§4.8).
#[must_use]
pub fn normalize_content(content: &str) -> String {
    let stripped: String = content.chars().filter(|c| !c.is_control() || *c == '\n' || *c == '\t').collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `content` should be stored as a single memory or chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Single,
    Chunked,
}

/// Classify `content` by an estimated token count (§4.8).
#[must_use]
pub fn classify_size(content: &str) -> SizeClass {
    let estimated_tokens = content.chars().count() / CHARS_PER_TOKEN;
    if estimated_tokens <= SINGLE_MEMORY_TOKEN_LIMIT {
        SizeClass::Single
    } else {
        SizeClass::Chunked
    }
}

/// Split `content` into overlapping chunks of at most [`CHUNK_SIZE`] characters.
#[must_use]
pub fn chunk_content(content: &str) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= CHUNK_SIZE {
        return vec![content.to_string()];
    }
    let mut chunks = Vec::new();
    let stride = CHUNK_SIZE - CHUNK_OVERLAP;
    let mut start = 0;
    while start < chars.len() {
        let end = (start + CHUNK_SIZE).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }
    chunks
}

struct EmbedStep {
    embedder: Arc<dyn EmbeddingProvider>,
    cache: EmbeddingCache,
    content: String,
}

#[async_trait]
impl SagaStep for EmbedStep {
    fn name(&self) -> &str {
        "embed"
    }

    async fn execute(&self, _context: &Value) -> Result<Value> {
        let model = self.embedder.model_name().to_string();
        if let Some(cached) = self.cache.get(&self.content, &model) {
            return Ok(json!({ "embedding": cached }));
        }

        let embedder = self.embedder.clone();
        let content = self.content.clone();
        let mut policy = crate::retry::RetryPolicy::new();
        let embedding = policy
            .execute(|| {
                let embedder = embedder.clone();
                let content = content.clone();
                async move { embedder.embed_text(&content).await.map_err(|e| Error::EmbeddingUnavailable(e.to_string())) }
            })
            .await?;
        crate::embeddings::provider_utils::validate_dimension(&embedding, crate::constants::defaults::EMBEDDING_DIMENSION_UNIFIED)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        self.cache.spawn_put(self.content.clone(), model, embedding.clone());
        Ok(json!({ "embedding": embedding }))
    }

    async fn compensate(&self, _context: &Value) -> Result<()> {
        Ok(())
    }
}

struct RelationalInsertStep {
    store: Arc<dyn RelationalStore>,
    item: MemoryItem,
}

#[async_trait]
impl SagaStep for RelationalInsertStep {
    fn name(&self) -> &str {
        "relational_insert"
    }

    async fn execute(&self, _context: &Value) -> Result<Value> {
        self.store.insert_memory_item(&self.item).await?;
        Ok(json!({ "relational_committed": true }))
    }

    async fn compensate(&self, _context: &Value) -> Result<()> {
        self.store.delete_content_row(&self.item.tenant, self.item.id).await
    }
}

struct VectorUpsertStep {
    store: Arc<dyn VectorStore>,
    id: Uuid,
    tenant: TenantContext,
}

#[async_trait]
impl SagaStep for VectorUpsertStep {
    fn name(&self) -> &str {
        "vector_upsert"
    }

    async fn execute(&self, context: &Value) -> Result<Value> {
        let embedding: Vec<f32> = context
            .get("embedding")
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(serde_json::Value::as_f64).map(|f| f as f32).collect())
            .unwrap_or_default();
        if embedding.iter().any(|f| !f.is_finite()) {
            return Err(Error::ExtractionFailure("embedding contains non-finite values".to_string()));
        }
        self.store
            .upsert(VectorRecord {
                id: self.id,
                embedding,
                company_id: self.tenant.company_id.clone(),
                app_id: self.tenant.app_id.clone(),
                user_id: self.tenant.user_id.clone(),
            })
            .await?;
        Ok(json!({ "vector_committed": true }))
    }

    async fn compensate(&self, _context: &Value) -> Result<()> {
        self.store.delete(self.id).await
    }
}

struct GraphInsertStep {
    store: Arc<dyn GraphStore>,
    tenant: TenantContext,
    id: Uuid,
    similar_to: Vec<(Uuid, f32)>,
}

#[async_trait]
impl SagaStep for GraphInsertStep {
    fn name(&self) -> &str {
        "graph_insert"
    }

    async fn execute(&self, _context: &Value) -> Result<Value> {
        self.store.upsert_node(&self.tenant, self.id, "Memory").await?;
        for (other, score) in &self.similar_to {
            if *score >= SIMILAR_TO_THRESHOLD {
                self.store
                    .create_edge(&Edge::new(self.id, *other, EdgeKind::SimilarTo, *score))
                    .await?;
            }
        }
        Ok(json!({ "graph_committed": true }))
    }

    async fn compensate(&self, _context: &Value) -> Result<()> {
        self.store.delete_node(self.id).await
    }
}

/// Orchestrates the 4-step write saga (embed → relational → vector → graph)
/// for a single memory, plus chunking for oversize content.
pub struct UnifiedStorageEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    relational: Arc<dyn RelationalStore>,
    vector: Arc<dyn VectorStore>,
    graph: Arc<dyn GraphStore>,
    coordinator: SagaCoordinator,
    recent: RecentMemoryCache,
    embedding_cache: EmbeddingCache,
}

impl UnifiedStorageEngine {
    #[must_use]
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        relational: Arc<dyn RelationalStore>,
        vector: Arc<dyn VectorStore>,
        graph: Arc<dyn GraphStore>,
    ) -> Self {
        Self {
            embedder,
            relational,
            vector,
            graph,
            coordinator: SagaCoordinator::new(),
            recent: RecentMemoryCache::new(),
            embedding_cache: EmbeddingCache::new(),
        }
    }

    /// The embedding-vector cache backing this engine's write path (§4.3).
    #[must_use]
    pub fn embedding_cache(&self) -> EmbeddingCache {
        self.embedding_cache.clone()
    }

    /// Store one normalized, size-validated memory, chunking it first if it
    /// exceeds [`SINGLE_MEMORY_TOKEN_LIMIT`] tokens (§4.8). An optional
    /// idempotency key short-circuits to the cached id on replay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the normalized content fails
    /// length validation, otherwise propagates the first saga failure.
    pub async fn store_memory(
        &self,
        content: &str,
        importance: f32,
        tenant: &TenantContext,
        idempotency_key: Option<&str>,
    ) -> Result<Vec<Uuid>> {
        self.store_memory_with_metadata(content, importance, tenant, idempotency_key, std::collections::BTreeMap::new()).await
    }

    /// Store one normalized, size-validated memory like [`Self::store_memory`],
    /// attaching `metadata` to each resulting row. Oversize content is
    /// chunked into mini-documents tagged `content_type=document_chunk` with
    /// a 1-based `page_number`, so the page-anchor recall override can find
    /// them by strict filter (§4.8, §4.10 step 9).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the normalized content fails
    /// length validation, otherwise propagates the first saga failure.
    pub async fn store_memory_with_metadata(
        &self,
        content: &str,
        importance: f32,
        tenant: &TenantContext,
        idempotency_key: Option<&str>,
        metadata: std::collections::BTreeMap<String, Value>,
    ) -> Result<Vec<Uuid>> {
        if let Some(key) = idempotency_key {
            if let Some(ids) = self.recent.get_by_idempotency_key(key) {
                return Ok(ids);
            }
        }

        let normalized = normalize_content(content);
        if !content_length_valid(&normalized) {
            return Err(Error::InvalidInput(format!(
                "content length {} outside accepted bounds",
                normalized.chars().count()
            )));
        }

        let pieces = match classify_size(&normalized) {
            SizeClass::Single => vec![normalized.clone()],
            SizeClass::Chunked => chunk_content(&normalized),
        };
        let chunked = pieces.len() > 1;

        let mut ids = Vec::with_capacity(pieces.len());
        for (chunk_index, piece) in pieces.iter().enumerate() {
            let mut item = MemoryItem::new(piece.as_str(), importance, tenant.clone());
            item.metadata = metadata.clone();
            if chunked {
                item.metadata.insert("content_type".to_string(), json!("document_chunk"));
                item.metadata.insert("page_number".to_string(), json!(chunk_index + 1));
                item.metadata.insert("chunk_count".to_string(), json!(pieces.len()));
            }
            let id = item.id;

            let steps: Vec<Box<dyn SagaStep>> = vec![
                Box::new(EmbedStep { embedder: self.embedder.clone(), cache: self.embedding_cache.clone(), content: piece.to_string() }),
                Box::new(RelationalInsertStep { store: self.relational.clone(), item: item.clone() }),
                Box::new(VectorUpsertStep { store: self.vector.clone(), id, tenant: tenant.clone() }),
                Box::new(GraphInsertStep { store: self.graph.clone(), tenant: tenant.clone(), id, similar_to: Vec::new() }),
            ];
            let saga = Saga::new(steps);
            let result = self.coordinator.run(&saga, json!({ "memory_id": item.id.to_string() })).await;
            if !result.success {
                return Err(Error::BackingStoreFailure {
                    store: "unified".to_string(),
                    message: result.error.unwrap_or_else(|| "saga failed".to_string()),
                });
            }
            ids.push(id);
        }

        self.recent.record(ids.clone());
        if let Some(key) = idempotency_key {
            self.recent.bind_idempotency_key(key, ids.clone());
        }
        Ok(ids)
    }
}
