//! Fast, bounded KV cache backing [`super::UnifiedStorageEngine`] (§4.8).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// TTL for idempotency-key bindings (§4.8).
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Bound on the recent-memories ring (§4.8).
pub const MAX_RECENT: usize = 1000;

struct Entry {
    ids: Vec<Uuid>,
    inserted_at: Instant,
}

/// Bounded recent-writes list plus a TTL'd idempotency-key lookup.
pub struct RecentMemoryCache {
    recent: Arc<RwLock<Vec<Uuid>>>,
    idempotency: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for RecentMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self { recent: Arc::new(RwLock::new(Vec::new())), idempotency: Arc::new(RwLock::new(HashMap::new())), ttl: DEFAULT_TTL }
    }

    /// Record freshly-written ids, evicting the oldest once [`MAX_RECENT`] is exceeded.
    pub fn record(&self, ids: Vec<Uuid>) {
        let mut recent = self.recent.write().expect("RecentMemoryCache: recent list lock poisoned");
        recent.extend(ids);
        let overflow = recent.len().saturating_sub(MAX_RECENT);
        if overflow > 0 {
            recent.drain(0..overflow);
        }
    }

    /// Bind an idempotency key to the ids it produced, for replay short-circuiting.
    pub fn bind_idempotency_key(&self, key: &str, ids: Vec<Uuid>) {
        self.idempotency
            .write()
            .expect("RecentMemoryCache: idempotency map lock poisoned")
            .insert(key.to_string(), Entry { ids, inserted_at: Instant::now() });
    }

    /// Look up ids by idempotency key, honoring the TTL.
    #[must_use]
    pub fn get_by_idempotency_key(&self, key: &str) -> Option<Vec<Uuid>> {
        let map = self.idempotency.read().expect("RecentMemoryCache: idempotency map lock poisoned");
        map.get(key).filter(|entry| entry.inserted_at.elapsed() < self.ttl).map(|entry| entry.ids.clone())
    }

    /// Snapshot of the bounded recent-writes list.
    #[must_use]
    pub fn recent_ids(&self) -> Vec<Uuid> {
        self.recent.read().expect("RecentMemoryCache: recent list lock poisoned").clone()
    }
}
