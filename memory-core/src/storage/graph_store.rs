//! Graph store trait for the unified storage engine (C8/C9, §6).

use crate::tenant::TenantContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relationship kinds the engine creates between graph nodes (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Vector-similarity link created at ingest when score ≥ 0.7.
    SimilarTo,
    /// Chronological chain to the most recent prior non-consolidated episode.
    FollowedBy,
    /// Shared `interaction_id` link between episodes in the same exchange.
    CausedBy,
    /// Episode → entity mention link.
    Mentions,
    /// Episode → fact link.
    Asserts,
    /// Summary episode → source episode link created by consolidation.
    SummarizedIn,
}

/// A directed, typed edge between two graph nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
    pub kind: EdgeKind,
    pub weight: f32,
}

impl Edge {
    #[must_use]
    pub fn new(from: Uuid, to: Uuid, kind: EdgeKind, weight: f32) -> Self {
        Self { id: Uuid::new_v4(), from, to, kind, weight: weight.clamp(0.0, 1.0) }
    }
}

/// Graph persistence for episode/entity/fact nodes and their edges.
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn upsert_node(&self, tenant: &TenantContext, id: Uuid, label: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn create_edge(&self, edge: &Edge) -> Result<()>;

    /// Fetch entities adjacent to `episode_id` via `MENTIONS` edges.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn adjacent_entities(&self, episode_id: Uuid) -> Result<Vec<Uuid>>;

    /// Fetch the top `limit` facts asserted by `episode_id`, ranked by the store's own ordering.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn top_facts(&self, episode_id: Uuid, limit: usize) -> Result<Vec<Uuid>>;

    /// Fetch episodes connected to `episode_id` by any edge kind.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn connected_episodes(&self, episode_id: Uuid) -> Result<Vec<Uuid>>;

    /// Find the most recent prior non-consolidated episode in scope, for
    /// temporal chaining (§4.9).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn most_recent_prior_episode(&self, tenant: &TenantContext, before: Uuid) -> Result<Option<Uuid>>;

    /// Idempotent delete: missing nodes are success (§4.8).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure (not on "not found").
    async fn delete_node(&self, id: Uuid) -> Result<()>;

    /// Redirect every edge endpoint at `from` to `to`, preserving kind and
    /// weight. Used by entity merges so `MENTIONS`/`ASSERTS` edges into a
    /// merged-away entity keep resolving (§6 `mergeEntities`).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn retarget_edges(&self, from: Uuid, to: Uuid) -> Result<()>;
}
