//! # Embedding Cache (C1, §4.3)
//!
//! Process-wide cache of previously computed embedding vectors, keyed by
//! the SHA-256 of normalized content plus the embedding model identifier —
//! so a model change can never serve a stale vector for the same text.
//! Entries expire after [`DEFAULT_TTL`]; writes are fire-and-forget so a
//! cache population never adds latency to the embed call path.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// TTL for a cached embedding (§4.3).
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    embedding: Vec<f32>,
    inserted_at: Instant,
}

/// `SHA-256(normalized_content || 0x00 || model)`, hex-encoded (§4.3).
#[must_use]
pub fn cache_key(normalized_content: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized_content.as_bytes());
    hasher.update([0u8]);
    hasher.update(model.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A shared, cloneable embedding-vector cache.
#[derive(Clone)]
pub struct EmbeddingCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingCache {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl: DEFAULT_TTL }
    }

    /// Look up a cached embedding for `(normalized_content, model)`, honoring the TTL.
    #[must_use]
    pub fn get(&self, normalized_content: &str, model: &str) -> Option<Vec<f32>> {
        let key = cache_key(normalized_content, model);
        let entries = self.entries.read().expect("EmbeddingCache: lock poisoned");
        entries.get(&key).filter(|e| e.inserted_at.elapsed() < self.ttl).map(|e| e.embedding.clone())
    }

    /// Insert synchronously. Prefer [`Self::spawn_put`] on the hot path.
    pub fn put(&self, normalized_content: &str, model: &str, embedding: Vec<f32>) {
        let key = cache_key(normalized_content, model);
        self.entries.write().expect("EmbeddingCache: lock poisoned").insert(key, Entry { embedding, inserted_at: Instant::now() });
    }

    /// Fire-and-forget write: spawns the insert and returns immediately, so
    /// populating the cache never delays the caller of an embed call (§4.3).
    pub fn spawn_put(&self, normalized_content: String, model: String, embedding: Vec<f32>) {
        let cache = self.clone();
        tokio::spawn(async move {
            cache.put(&normalized_content, &model, embedding);
        });
    }

    /// Drop expired entries. Callers may run this periodically; it is never
    /// required for correctness since [`Self::get`] already checks the TTL.
    pub fn evict_expired(&self) {
        let mut entries = self.entries.write().expect("EmbeddingCache: lock poisoned");
        entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().expect("EmbeddingCache: lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
