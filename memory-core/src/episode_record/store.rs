//! # Episode Store (C9, §4.9)
//!
//! Specializes the unified write path for episodes: a content-hash dedup
//! pre-check, extraction before embedding, temporal/causal edge creation,
//! and a scheduled consolidation sweep.

use super::{content_hash, decay_rate, EpisodeRecord, EpisodeType};
use crate::entity::EntityFactExtractor;
use crate::fact::Fact;
use crate::storage::{Edge, EdgeKind, GraphStore, RelationalStore};
use crate::tenant::TenantContext;
use crate::unified_storage::UnifiedStorageEngine;
use crate::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Decayed-importance threshold below which an episode is eligible for consolidation (§4.9).
pub const CONSOLIDATION_IMPORTANCE_THRESHOLD: f32 = 0.1;
/// Window used to group candidate episodes by proximity in time (§4.9).
pub const CONSOLIDATION_GROUP_WINDOW: ChronoDuration = ChronoDuration::hours(12);
/// Minimum group size that produces a summary episode (§4.9).
pub const MIN_CONSOLIDATION_GROUP_SIZE: usize = 2;
/// Causal edge weight for a matched user_query → system_response pair (§3).
pub const CAUSAL_EDGE_WEIGHT: f32 = 0.9;
/// Temporal edge weight (§3).
pub const TEMPORAL_EDGE_WEIGHT: f32 = 1.0;

/// Result of a `storeEpisode` call (§6).
#[derive(Debug, Clone)]
pub struct StoreEpisodeResult {
    pub episode_id: Uuid,
    pub duplicate: bool,
    pub content_hash: String,
    pub entities_extracted: usize,
    pub facts_extracted: usize,
    pub edges_created: usize,
}

/// Coordinates episode ingestion on top of the unified write saga.
pub struct EpisodeStore {
    relational: Arc<dyn RelationalStore>,
    graph: Arc<dyn GraphStore>,
    unified: Arc<UnifiedStorageEngine>,
    extractor: EntityFactExtractor,
}

impl EpisodeStore {
    #[must_use]
    pub fn new(
        relational: Arc<dyn RelationalStore>,
        graph: Arc<dyn GraphStore>,
        unified: Arc<UnifiedStorageEngine>,
        extractor: EntityFactExtractor,
    ) -> Self {
        Self { relational, graph, unified, extractor }
    }

    /// Store an episode, deduplicating on `(content_hash, tenant)` and
    /// degrading gracefully if embedding fails (§4.9): entities, facts, and
    /// edges are still persisted even when `has_embedding` ends up false.
    ///
    /// # Errors
    ///
    /// Returns an error only on relational/graph backing-store failure; a
    /// failed embedding is recorded on the episode, not returned as an error.
    pub async fn store_episode(
        &self,
        content: &str,
        episode_type: EpisodeType,
        importance: f32,
        tenant: &TenantContext,
        interaction_id: Option<&str>,
    ) -> Result<StoreEpisodeResult> {
        let normalized = crate::unified_storage::normalize_content(content);
        let hash = content_hash(&normalized);

        if let Some(existing) = self.relational.find_by_content_hash(tenant, &hash).await? {
            return Ok(StoreEpisodeResult {
                episode_id: existing.item.id,
                duplicate: true,
                content_hash: hash,
                entities_extracted: 0,
                facts_extracted: 0,
                edges_created: 0,
            });
        }

        let mut episode = EpisodeRecord::new(normalized.clone(), episode_type, importance, tenant.clone());
        if let Some(interaction_id) = interaction_id {
            episode = episode.with_interaction_id(interaction_id);
        }

        let entities = self.extractor.extract_entities(&normalized, tenant).await;
        let facts: Vec<Fact> = self.extractor.extract_facts(&normalized, episode.item.id, tenant);
        episode.entities = entities.iter().map(|e| e.id).collect();
        episode.facts = facts.iter().map(|f| f.id).collect();

        let store_result = self.unified.store_memory(&normalized, importance, tenant, None).await;
        episode.has_embedding = store_result.is_ok();

        self.relational.insert_episode(&episode).await?;

        let mut edges_created = 0;
        for entity_id in &episode.entities {
            self.graph
                .create_edge(&Edge::new(episode.item.id, *entity_id, EdgeKind::Mentions, 1.0))
                .await?;
            edges_created += 1;
        }
        for fact_id in &episode.facts {
            self.graph
                .create_edge(&Edge::new(episode.item.id, *fact_id, EdgeKind::Asserts, 1.0))
                .await?;
            edges_created += 1;
        }

        if let Some(prior) = self.graph.most_recent_prior_episode(tenant, episode.item.id).await? {
            self.graph
                .create_edge(&Edge::new(prior, episode.item.id, EdgeKind::FollowedBy, TEMPORAL_EDGE_WEIGHT))
                .await?;
            edges_created += 1;
        }

        if episode_type == EpisodeType::SystemResponse {
            if let Some(interaction_id) = interaction_id {
                let recent = self.relational.list_recent(tenant, usize::MAX).await?;
                if let Some(query_episode) = recent.into_iter().find(|e| {
                    e.episode_type == EpisodeType::UserQuery
                        && e.interaction_id.as_deref() == Some(interaction_id)
                }) {
                    self.graph
                        .create_edge(&Edge::new(
                            query_episode.item.id,
                            episode.item.id,
                            EdgeKind::CausedBy,
                            CAUSAL_EDGE_WEIGHT,
                        ))
                        .await?;
                    edges_created += 1;
                }
            }
        }

        Ok(StoreEpisodeResult {
            episode_id: episode.item.id,
            duplicate: false,
            content_hash: hash,
            entities_extracted: entities.len(),
            facts_extracted: facts.len(),
            edges_created,
        })
    }

    /// Run the consolidation sweep: select episodes older than `before` whose
    /// decayed importance has dropped below [`CONSOLIDATION_IMPORTANCE_THRESHOLD`],
    /// group them by type or by a 12-hour timestamp window, and replace
    /// groups of 2+ with a summary episode (§4.9).
    ///
    /// # Errors
    ///
    /// Returns an error on relational/graph backing-store failure.
    pub async fn consolidate(&self, before: DateTime<Utc>, tenant: &TenantContext) -> Result<usize> {
        let candidates: Vec<EpisodeRecord> = self
            .relational
            .list_recent(tenant, usize::MAX)
            .await?
            .into_iter()
            .filter(|e| !e.consolidated && e.item.timestamp < before)
            .filter(|e| e.decayed_importance(before) < CONSOLIDATION_IMPORTANCE_THRESHOLD)
            .collect();

        let groups = group_for_consolidation(&candidates);
        let mut consolidated_count = 0;

        for group in groups {
            if group.len() < MIN_CONSOLIDATION_GROUP_SIZE {
                continue;
            }
            let summary_content = format!("Summary of {} related episodes.", group.len());
            let mut summary = EpisodeRecord::new(
                summary_content,
                EpisodeType::Summary,
                group.iter().map(|e| e.item.importance).sum::<f32>() / group.len() as f32,
                TenantContext::system(&tenant.company_id, &tenant.app_id),
            );
            summary.decay_rate = decay_rate(summary.item.importance);
            self.relational.insert_episode(&summary).await?;

            for episode in &group {
                self.graph
                    .create_edge(&Edge::new(summary.item.id, episode.item.id, EdgeKind::SummarizedIn, 1.0))
                    .await?;
                let mut updated = episode.clone();
                updated.consolidated = true;
                self.relational.update_episode(&updated).await?;
                consolidated_count += 1;
            }
        }

        Ok(consolidated_count)
    }
}

/// Group candidate episodes either by identical [`EpisodeType`] or by
/// timestamps falling within [`CONSOLIDATION_GROUP_WINDOW`] of one another.
fn group_for_consolidation(candidates: &[EpisodeRecord]) -> Vec<Vec<EpisodeRecord>> {
    let mut by_type: std::collections::HashMap<String, Vec<EpisodeRecord>> = std::collections::HashMap::new();
    for episode in candidates {
        by_type.entry(format!("{:?}", episode.episode_type)).or_default().push(episode.clone());
    }

    let mut groups = Vec::new();
    for (_type, mut members) in by_type {
        members.sort_by_key(|e| e.item.timestamp);
        let mut current_group: Vec<EpisodeRecord> = Vec::new();
        for member in members {
            if let Some(last) = current_group.last() {
                if member.item.timestamp - last.item.timestamp > CONSOLIDATION_GROUP_WINDOW {
                    groups.push(std::mem::take(&mut current_group));
                }
            }
            current_group.push(member);
        }
        if !current_group.is_empty() {
            groups.push(current_group);
        }
    }
    groups
}
