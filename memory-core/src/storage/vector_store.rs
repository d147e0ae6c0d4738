//! Vector store trait for the unified storage engine (C8, §6).

use crate::tenant::TenantFilter;
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vector record keyed by episode/memory id, with tenant payload for
/// metadata filtering at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: Uuid,
    pub embedding: Vec<f32>,
    pub company_id: String,
    pub app_id: String,
    pub user_id: String,
}

/// One scored hit from a vector search.
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub id: Uuid,
    pub score: f32,
}

/// Tenant-filtered approximate nearest-neighbor search.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn upsert(&self, record: VectorRecord) -> Result<()>;

    /// Search within `filter`, fetching up to `limit` hits at or above `min_score`.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn search(&self, query: &[f32], filter: &TenantFilter, limit: usize, min_score: f32) -> Result<Vec<VectorHit>>;

    /// Idempotent delete: missing ids are success (§4.8).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure (not on "not found").
    async fn delete(&self, id: Uuid) -> Result<()>;
}
