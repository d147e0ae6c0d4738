//! # Recall Engine (C10, §4.10)
//!
//! A ten-step pipeline: budget init, lightweight query-entity extraction,
//! weight merge, query embedding, tenant-filtered vector search, graph
//! enrichment, hybrid scoring, optional rerank, page-anchor override, and
//! token-budgeted response assembly.

mod scoring;

pub use scoring::{recency_factor, HybridScore, RecallWeights};

use crate::budget::TokenBudgetManager;
use crate::embeddings::EmbeddingProvider;
use crate::entity::{EntityFactExtractor, ExtractedEntity};
use crate::episode_record::{EpisodeRecord, MemoryItem};
use crate::fact::Fact;
use crate::rerank::CrossEncoderReranker;
use crate::storage::{GraphStore, RelationalStore, VectorStore};
use crate::tenant::{TenantContext, TenantGate};
use crate::Result;
use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

/// Vector-search score threshold for episodic-only recall (§4.10).
pub const EPISODIC_SCORE_THRESHOLD: f32 = 0.5;
/// Vector-search score threshold for unified (memory+document_chunk) search (§4.10).
pub const UNIFIED_SCORE_THRESHOLD: f32 = 0.15;
/// Score threshold applied to page-anchor hits: none, since they are an
/// exact metadata match rather than a similarity search (§4.10 step 9).
pub const PAGE_ANCHOR_SCORE_THRESHOLD: f32 = 0.0;
/// Vector results fetched per requested result, before scoring/rerank (§4.10).
pub const FETCH_MULTIPLIER: usize = 3;
/// Rerank shortlist cap (§4.10).
pub const RERANK_SHORTLIST_MAX: usize = 30;
/// Number of adjacent facts fetched per hit (§4.10).
pub const TOP_FACTS_PER_EPISODE: usize = 5;

/// Capacity-planning token costs per episode, by response level — NOT the
/// actual per-hit cost used for budget allocation, which is computed from
/// the real serialized payload (§4.10).
pub const SUMMARY_TOKENS_PER_EPISODE: usize = 80;
pub const MEDIUM_TOKENS_PER_EPISODE: usize = 200;
pub const FULL_TOKENS_PER_EPISODE: usize = 800;
/// Structural overhead applied on top of the raw JSON-length/4 estimate (§4.10).
pub const STRUCTURAL_OVERHEAD_FRACTION: f32 = 0.2;

/// Connected episodes considered when building `temporal_context`, per hit (§4.10 step 10).
const TEMPORAL_CONTEXT_WINDOW: usize = 5;
/// Multiplier applied to [`TEMPORAL_CONTEXT_WINDOW`] for the first (highest-scored) hit.
const FIRST_EPISODE_TEMPORAL_MULTIPLIER: usize = 3;

static PAGE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bpage\s+(\d+)\b").expect("valid regex"));

/// Caller-facing detail level for the assembled response (§3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLevel {
    Summary,
    Standard,
    Full,
}

impl ResponseLevel {
    /// Capacity-planning token cost for one episode at this level (§4.10).
    #[must_use]
    pub fn planning_tokens_per_episode(self) -> usize {
        match self {
            Self::Summary => SUMMARY_TOKENS_PER_EPISODE,
            Self::Standard => MEDIUM_TOKENS_PER_EPISODE,
            Self::Full => FULL_TOKENS_PER_EPISODE,
        }
    }
}

/// One ranked recall hit, ready for token-budgeted assembly.
#[derive(Debug, Clone)]
pub struct RecallHit {
    pub episode_id: Uuid,
    pub score: HybridScore,
    pub entities: Vec<Uuid>,
    pub connected_episodes: Vec<Uuid>,
    pub facts: Vec<Uuid>,
    pub episode: Option<EpisodeRecord>,
    pub memory_item: Option<MemoryItem>,
}

impl RecallHit {
    fn content(&self) -> &str {
        if let Some(episode) = &self.episode {
            &episode.item.content
        } else if let Some(item) = &self.memory_item {
            &item.content
        } else {
            ""
        }
    }

    fn summary(&self) -> Option<&str> {
        self.episode.as_ref().and_then(|e| e.summary.as_deref())
    }

    /// The JSON payload this hit would contribute to a response at `level`,
    /// used both to estimate and to assemble the final response (§4.10).
    fn payload(&self, level: ResponseLevel) -> serde_json::Value {
        let content = self.content();
        match level {
            ResponseLevel::Summary => json!({
                "episode_id": self.episode_id,
                "summary": self.summary().map(str::to_string).unwrap_or_else(|| content.chars().take(150).collect::<String>()),
                "score": self.score.final_score,
            }),
            ResponseLevel::Standard => json!({
                "episode_id": self.episode_id,
                "content": content,
                "score": self.score.final_score,
                "facts": self.facts,
            }),
            ResponseLevel::Full => json!({
                "episode_id": self.episode_id,
                "content": content,
                "score": self.score,
                "entities": self.entities,
                "facts": self.facts,
                "connected_episodes": self.connected_episodes,
            }),
        }
    }

    /// Actual token cost: serialized JSON length / 4, plus 20% structural
    /// overhead, in place of a flat per-hit estimate (§4.10).
    fn estimated_tokens(&self, level: ResponseLevel) -> usize {
        let json_len = serde_json::to_string(&self.payload(level)).map(|s| s.chars().count()).unwrap_or(0);
        let base = json_len as f32 / 4.0;
        (base * (1.0 + STRUCTURAL_OVERHEAD_FRACTION)).ceil() as usize
    }
}

/// A complete recall response (§4.10 step 10, §6 `recallEpisodes`).
#[derive(Debug, Clone)]
pub struct RecallResponse {
    pub hits: Vec<RecallHit>,
    pub truncated_by_budget: bool,
    pub total_count: usize,
    pub returned_count: usize,
    pub estimated_tokens: usize,
    pub response_level: ResponseLevel,
    pub token_limit_reached: bool,
    pub query_entities: Vec<ExtractedEntity>,
    pub scoring_weights_used: RecallWeights,
    pub entities: Vec<ExtractedEntity>,
    pub facts: Vec<Fact>,
    pub temporal_context: Option<String>,
    /// Set when a page-anchor query matched no document chunks at all.
    pub notice: Option<String>,
}

/// Orchestrates query-time retrieval across the vector and graph stores.
pub struct RecallEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    vector: Arc<dyn VectorStore>,
    graph: Arc<dyn GraphStore>,
    relational: Arc<dyn RelationalStore>,
    extractor: EntityFactExtractor,
    reranker: Option<Arc<dyn CrossEncoderReranker>>,
    gate: TenantGate,
}

impl RecallEngine {
    #[must_use]
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        vector: Arc<dyn VectorStore>,
        graph: Arc<dyn GraphStore>,
        relational: Arc<dyn RelationalStore>,
        extractor: EntityFactExtractor,
        reranker: Option<Arc<dyn CrossEncoderReranker>>,
    ) -> Self {
        Self { embedder, vector, graph, relational, extractor, reranker, gate: TenantGate::new() }
    }

    /// Run the full recall pipeline for `query` (§4.10).
    ///
    /// # Errors
    ///
    /// Returns an error if query embedding or a required backing-store call fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn recall(
        &self,
        query: &str,
        tenant: &TenantContext,
        max_results: usize,
        response_level: ResponseLevel,
        weights: Option<RecallWeights>,
        token_budget: usize,
        unified_search: bool,
        include_legacy_lane: bool,
    ) -> Result<RecallResponse> {
        // Step 1: budget init (10% overhead reserved internally).
        let mut budget = TokenBudgetManager::new(token_budget);

        // Step 2: lightweight query-entity extraction.
        let query_entities = self.extractor.extract_entities(query, tenant).await;

        // Step 3: weight merge/renormalize.
        let weights = weights.unwrap_or_default().renormalized();

        // Step 9 precursor: page-anchor override short-circuits the vector search entirely.
        let hits = if let Some(captures) = PAGE_ANCHOR.captures(query) {
            let page_number = captures[1].parse::<u64>().unwrap_or(0);
            let chunks = self.relational.find_by_page(tenant, page_number).await?;
            if chunks.is_empty() {
                return Ok(RecallResponse {
                    hits: Vec::new(),
                    truncated_by_budget: false,
                    total_count: 0,
                    returned_count: 0,
                    estimated_tokens: 0,
                    response_level,
                    token_limit_reached: false,
                    query_entities,
                    scoring_weights_used: weights,
                    entities: Vec::new(),
                    facts: Vec::new(),
                    temporal_context: None,
                    notice: Some(format!("no results for page {page_number}")),
                });
            }
            chunks
                .into_iter()
                .map(|item| {
                    let score = HybridScore::compute(1.0, 0.0, 1.0, item.importance, &weights);
                    RecallHit { episode_id: item.id, score, entities: Vec::new(), connected_episodes: Vec::new(), facts: Vec::new(), episode: None, memory_item: Some(item) }
                })
                .collect::<Vec<_>>()
        } else {
            // Step 4: query embedding.
            let query_vector = self.embedder.embed_text(query).await.map_err(|e| crate::Error::EmbeddingUnavailable(e.to_string()))?;
            crate::embeddings::provider_utils::validate_dimension(&query_vector, crate::constants::defaults::EMBEDDING_DIMENSION_UNIFIED)
                .map_err(|e| crate::Error::EmbeddingUnavailable(e.to_string()))?;

            // Step 5: tenant-filtered vector search.
            let filter = self.gate.read_filter(tenant, include_legacy_lane);
            let threshold = if unified_search { UNIFIED_SCORE_THRESHOLD } else { EPISODIC_SCORE_THRESHOLD };
            let fetch_limit = max_results.saturating_mul(FETCH_MULTIPLIER).max(1);
            let vector_hits = self.vector.search(&query_vector, &filter, fetch_limit, threshold).await?;

            // Step 6: graph enrichment + Step 7: hybrid scoring.
            let mut hits = Vec::with_capacity(vector_hits.len());
            for hit in &vector_hits {
                let adjacent_entities = self.graph.adjacent_entities(hit.id).await?;
                let top_facts = self.graph.top_facts(hit.id, TOP_FACTS_PER_EPISODE).await?;
                let connected_episodes = self.graph.connected_episodes(hit.id).await?;

                let entity_relevance = scoring::entity_relevance(&query_entities, &adjacent_entities);
                let episode = self.relational.get_episode(tenant, hit.id).await?;
                let (recency, importance) = episode
                    .as_ref()
                    .map(|e| (recency_factor((chrono::Utc::now() - e.item.timestamp).num_days()), e.item.importance))
                    .unwrap_or((0.5, 0.5));

                let score = HybridScore::compute(hit.score, entity_relevance, recency, importance, &weights);
                hits.push(RecallHit {
                    episode_id: hit.id,
                    score,
                    entities: adjacent_entities,
                    connected_episodes,
                    facts: top_facts,
                    episode,
                    memory_item: None,
                });
            }

            // Step 8: optional cross-encoder rerank over a bounded shortlist.
            if let Some(reranker) = &self.reranker {
                if hits.len() >= 2 {
                    let shortlist_len = hits.len().min(max_results.saturating_mul(FETCH_MULTIPLIER)).min(RERANK_SHORTLIST_MAX);
                    hits.truncate(shortlist_len);
                    let docs: Vec<String> = hits.iter().map(|h| h.episode_id.to_string()).collect();
                    if let Ok(reranked) = reranker.rerank(query, &docs, hits.len()).await {
                        for r in &reranked {
                            if let Some(hit) = hits.get_mut(r.index) {
                                hit.score.final_score = hit.score.final_score.max(f64::from(r.score) as f32);
                            }
                        }
                    }
                }
            }

            hits.sort_by(|a, b| b.score.final_score.partial_cmp(&a.score.final_score).unwrap_or(std::cmp::Ordering::Equal));
            hits.truncate(max_results);
            hits
        };

        let total_count = hits.len();

        // Step 10: token-budgeted assembly, shaped by response level.
        let mut truncated_by_budget = false;
        let mut assembled = Vec::with_capacity(hits.len());
        let mut estimated_tokens = 0usize;
        for hit in hits {
            let cost = hit.estimated_tokens(response_level);
            if budget.allocate(cost) {
                estimated_tokens += cost;
                assembled.push(hit);
            } else {
                truncated_by_budget = true;
                break;
            }
        }

        let (entities, facts, temporal_context) = self.shape_by_level(tenant, &assembled, response_level).await?;

        Ok(RecallResponse {
            returned_count: assembled.len(),
            hits: assembled,
            truncated_by_budget,
            total_count,
            estimated_tokens,
            response_level,
            token_limit_reached: truncated_by_budget,
            query_entities,
            scoring_weights_used: weights,
            entities,
            facts,
            temporal_context,
            notice: None,
        })
    }

    /// Resolve the entities/facts/temporal-context side channels assembled
    /// hits contribute, scaled by `response_level` (§4.10 step 10, §6).
    async fn shape_by_level(
        &self,
        tenant: &TenantContext,
        assembled: &[RecallHit],
        response_level: ResponseLevel,
    ) -> Result<(Vec<ExtractedEntity>, Vec<Fact>, Option<String>)> {
        if response_level == ResponseLevel::Summary {
            return Ok((Vec::new(), Vec::new(), None));
        }

        let mut entity_ids = Vec::new();
        for hit in assembled {
            for id in &hit.entities {
                if !entity_ids.contains(id) {
                    entity_ids.push(*id);
                }
            }
        }
        let mut entities = Vec::new();
        for id in &entity_ids {
            if let Some(entity) = self.relational.get_entity(tenant, *id).await? {
                entities.push(entity);
            }
        }
        entities.truncate(crate::constants::extraction::MAX_ENTITIES_PER_QUERY);

        if response_level != ResponseLevel::Full {
            return Ok((entities, Vec::new(), None));
        }

        let mut fact_ids = Vec::new();
        for hit in assembled {
            for id in &hit.facts {
                if !fact_ids.contains(id) {
                    fact_ids.push(*id);
                }
            }
        }
        let mut facts = Vec::new();
        for id in &fact_ids {
            if let Some(fact) = self.relational.get_fact(tenant, *id).await? {
                facts.push(fact);
            }
        }

        let mut timestamps = Vec::new();
        for (index, hit) in assembled.iter().enumerate() {
            let window = if index == 0 { TEMPORAL_CONTEXT_WINDOW * FIRST_EPISODE_TEMPORAL_MULTIPLIER } else { TEMPORAL_CONTEXT_WINDOW };
            if let Some(episode) = &hit.episode {
                timestamps.push(episode.item.timestamp);
            }
            for connected_id in hit.connected_episodes.iter().take(window) {
                if let Some(connected) = self.relational.get_episode(tenant, *connected_id).await? {
                    timestamps.push(connected.item.timestamp);
                }
            }
        }
        timestamps.sort();
        let temporal_context = match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => Some(format!("{} episodes spanning {} to {}", timestamps.len(), first.to_rfc3339(), last.to_rfc3339())),
            _ => None,
        };

        Ok((entities, facts, temporal_context))
    }
}
