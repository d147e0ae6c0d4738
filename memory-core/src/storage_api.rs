//! # Storage API facade (§6)
//!
//! Thin orchestration over the relational/graph/vector stores and the
//! episode/unified write paths, exposing the operations external callers
//! (CLI, MCP tools) invoke directly. [`RecallEngine`] covers `recallEpisodes`;
//! this module covers everything else in the external interface.

use crate::embeddings::EmbeddingProvider;
use crate::entity::ExtractedEntity;
use crate::episode_record::{EpisodeRecord, EpisodeStore, MemoryItem};
use crate::fact::Fact;
use crate::recall::UNIFIED_SCORE_THRESHOLD;
use crate::storage::{GraphStore, RelationalStore, VectorStore};
use crate::tenant::{TenantContext, TenantGate};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

static PAGE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bpage\s+(\d+)\b").expect("valid regex"));

/// Result of `mergeEntities` (§6): aliases union and mention counts sum onto
/// whichever candidate had the highest salience.
#[derive(Debug, Clone)]
pub struct MergeEntitiesResult {
    pub primary_id: Uuid,
    pub merged_ids: Vec<Uuid>,
    pub mention_count: u32,
}

/// Aggregate health snapshot returned by `getMemoryStats` (§6).
#[derive(Debug, Clone)]
pub struct MemoryStats {
    pub total_episodes: usize,
    pub total_entities: usize,
    pub total_facts: usize,
    pub avg_importance: f32,
    pub memory_health: String,
}

/// A flat similarity-search hit for `recallMemories` (§6) — simpler than a
/// `recallEpisodes` hit, with no entity/fact/temporal side channels.
#[derive(Debug, Clone)]
pub struct MemoryHit {
    pub id: Uuid,
    pub content: String,
    pub relevance_score: f32,
    pub metadata: std::collections::BTreeMap<String, serde_json::Value>,
}

/// Composes the storage backends into the external read/write/admin
/// operations that aren't already covered by [`crate::recall::RecallEngine`]
/// or [`crate::unified_storage::UnifiedStorageEngine`].
pub struct StorageApi {
    relational: Arc<dyn RelationalStore>,
    graph: Arc<dyn GraphStore>,
    vector: Arc<dyn VectorStore>,
    episodes: Arc<EpisodeStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    gate: TenantGate,
}

impl StorageApi {
    #[must_use]
    pub fn new(
        relational: Arc<dyn RelationalStore>,
        graph: Arc<dyn GraphStore>,
        vector: Arc<dyn VectorStore>,
        episodes: Arc<EpisodeStore>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self { relational, graph, vector, episodes, embedder, gate: TenantGate::new() }
    }

    /// `getMemoryById` (§6).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    pub async fn get_memory_by_id(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<MemoryItem>> {
        self.relational.get_memory_item(tenant, id).await
    }

    /// `getEpisodeById` (§6).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    pub async fn get_episode_by_id(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<EpisodeRecord>> {
        self.relational.get_episode(tenant, id).await
    }

    /// `listMemories` (§6), newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    pub async fn list_memories(&self, tenant: &TenantContext, limit: usize, offset: usize) -> Result<Vec<MemoryItem>> {
        self.relational.list_memory_items(tenant, limit, offset).await
    }

    /// `updateEpisodeImportance` (§6): `importance` is clamped to `[0,1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` doesn't resolve within `tenant`.
    pub async fn update_episode_importance(&self, tenant: &TenantContext, id: Uuid, importance: f32) -> Result<()> {
        let mut episode = self.relational.get_episode(tenant, id).await?.ok_or(Error::NotFound(id))?;
        episode.item.importance = importance.clamp(0.0, 1.0);
        self.relational.update_episode(&episode).await
    }

    /// `validateFact` (§6): toggles validity and timestamps `validated_at`
    /// without erasing the fact's history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` doesn't resolve within `tenant`.
    pub async fn validate_fact(&self, tenant: &TenantContext, id: Uuid, is_valid: bool) -> Result<Fact> {
        let mut fact = self.relational.get_fact(tenant, id).await?.ok_or(Error::NotFound(id))?;
        fact.validate(is_valid);
        self.relational.upsert_fact(&fact).await?;
        Ok(fact)
    }

    /// `mergeEntities` (§6): the candidate with the highest salience becomes
    /// primary; the rest contribute their aliases and mention counts, have
    /// their graph edges retargeted onto the primary, and are deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `ids` is empty, or
    /// [`Error::NotFound`] if any id doesn't resolve within `tenant`.
    pub async fn merge_entities(&self, tenant: &TenantContext, ids: &[Uuid]) -> Result<MergeEntitiesResult> {
        if ids.is_empty() {
            return Err(Error::InvalidInput("mergeEntities requires at least one id".to_string()));
        }
        let mut candidates: Vec<ExtractedEntity> = Vec::with_capacity(ids.len());
        for id in ids {
            let entity = self.relational.get_entity(tenant, *id).await?.ok_or(Error::NotFound(*id))?;
            candidates.push(entity);
        }

        let primary_index = candidates
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.salience.partial_cmp(&b.salience).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);
        let mut primary = candidates.remove(primary_index);

        for other in &candidates {
            primary.aliases.insert(other.name.clone());
            primary.aliases.extend(other.aliases.iter().cloned());
            primary.mention_count += other.mention_count;
            primary.last_seen = primary.last_seen.max(other.last_seen);
            primary.first_seen = primary.first_seen.min(other.first_seen);
        }

        self.relational.upsert_entity(&primary).await?;
        let mut merged_ids = Vec::with_capacity(candidates.len());
        for other in &candidates {
            self.graph.retarget_edges(other.id, primary.id).await?;
            self.relational.delete_entity(other.id).await?;
            merged_ids.push(other.id);
        }

        Ok(MergeEntitiesResult { primary_id: primary.id, merged_ids, mention_count: primary.mention_count })
    }

    /// `getMemoryStats` (§6): `memory_health` is a coarse label, not a score.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    pub async fn get_memory_stats(&self, tenant: &TenantContext) -> Result<MemoryStats> {
        let episodes = self.relational.list_recent(tenant, usize::MAX).await?;
        let total_episodes = episodes.len();
        let total_entities = self.relational.list_entities(tenant, usize::MAX).await?.len();
        let total_facts = episodes.iter().map(|e| e.facts.len()).sum();
        let avg_importance = if total_episodes == 0 {
            0.0
        } else {
            episodes.iter().map(|e| e.item.importance).sum::<f32>() / total_episodes as f32
        };
        let memory_health = if avg_importance >= 0.66 {
            "healthy"
        } else if avg_importance >= 0.33 {
            "fair"
        } else {
            "degraded"
        }
        .to_string();

        Ok(MemoryStats { total_episodes, total_entities, total_facts, avg_importance, memory_health })
    }

    /// `consolidateMemories` (§6): delegates to [`EpisodeStore::consolidate`].
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    pub async fn consolidate_memories(&self, tenant: &TenantContext, before: DateTime<Utc>) -> Result<usize> {
        self.episodes.consolidate(before, tenant).await
    }

    /// `recallMemories` (§6): a flat similarity search over memory items and
    /// episodes, with the same page-anchor override `recallEpisodes` uses for
    /// document-chunk lookups. `rerank` is accepted for interface parity but
    /// unused — no reranker is wired into this path.
    ///
    /// # Errors
    ///
    /// Returns an error if query embedding or a required backing-store call fails.
    pub async fn recall_memories(&self, query: &str, tenant: &TenantContext, limit: usize, rerank: bool) -> Result<Vec<MemoryHit>> {
        let _ = rerank;

        if let Some(captures) = PAGE_ANCHOR.captures(query) {
            let page_number = captures[1].parse::<u64>().unwrap_or(0);
            let chunks = self.relational.find_by_page(tenant, page_number).await?;
            return Ok(chunks
                .into_iter()
                .map(|item| MemoryHit { id: item.id, content: item.content.clone(), relevance_score: 1.0, metadata: item.metadata })
                .collect());
        }

        let query_vector = self.embedder.embed_text(query).await.map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        let filter = self.gate.read_filter(tenant, false);
        let vector_hits = self.vector.search(&query_vector, &filter, limit, UNIFIED_SCORE_THRESHOLD).await?;

        let mut hits = Vec::with_capacity(vector_hits.len());
        for hit in vector_hits {
            if let Some(item) = self.relational.get_memory_item(tenant, hit.id).await? {
                hits.push(MemoryHit { id: item.id, content: item.content.clone(), relevance_score: hit.score, metadata: item.metadata.clone() });
            } else if let Some(episode) = self.relational.get_episode(tenant, hit.id).await? {
                hits.push(MemoryHit {
                    id: episode.item.id,
                    content: episode.item.content.clone(),
                    relevance_score: hit.score,
                    metadata: episode.item.metadata.clone(),
                });
            }
        }
        hits.truncate(limit);
        Ok(hits)
    }
}
