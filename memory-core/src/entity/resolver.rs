//! # Entity Resolver (C4)
//!
//! Fuzzy dedup pipeline: exact match → Levenshtein similarity ≥ 0.6 →
//! cross-encoder rerank over the shortlist → auto-merge at a stricter
//! threshold (0.9).

use super::ExtractedEntity;
use crate::rerank::CrossEncoderReranker;
use std::sync::Arc;
use uuid::Uuid;

/// The maximum number of existing tenant entities considered per resolution (§4.7, §9 open question c).
pub const MAX_CANDIDATE_WINDOW: usize = 500;

/// Levenshtein similarity floor for phase 2 (§4.7).
pub const LEVENSHTEIN_FLOOR: f64 = 0.6;

/// Auto-merge threshold (§4.7), stricter than the return-filter threshold.
pub const AUTO_MERGE_THRESHOLD: f64 = 0.9;

/// Upper bound (exclusive) on the phase-2 shortlist size eligible for rerank (§4.7).
pub const RERANK_SHORTLIST_MAX: usize = 30;

/// A resolved candidate: the existing entity id and its similarity to the query name.
#[derive(Debug, Clone)]
pub struct ResolvedCandidate {
    pub entity_id: Uuid,
    pub similarity: f64,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fuzzy entity-dedup resolver.
pub struct EntityResolver {
    reranker: Option<Arc<dyn CrossEncoderReranker>>,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self { reranker: None }
    }
}

impl EntityResolver {
    /// Construct a resolver, optionally wired to a cross-encoder reranker for phase 3.
    #[must_use]
    pub fn new(reranker: Option<Arc<dyn CrossEncoderReranker>>) -> Self {
        Self { reranker }
    }

    /// Resolve `candidate_name` against up to [`MAX_CANDIDATE_WINDOW`] existing
    /// tenant entities, returning matches at or above `threshold`, sorted
    /// descending by similarity.
    ///
    /// `existing` should already be capped to the most-mentioned entities by
    /// the caller (§4.7).
    pub async fn resolve(
        &self,
        candidate_name: &str,
        existing: &[ExtractedEntity],
        threshold: f64,
    ) -> Vec<ResolvedCandidate> {
        let window: Vec<&ExtractedEntity> = existing.iter().take(MAX_CANDIDATE_WINDOW).collect();
        let normalized_candidate = normalize(candidate_name);

        // Phase 1: exact.
        let mut results: Vec<ResolvedCandidate> = Vec::new();
        let mut remaining: Vec<&ExtractedEntity> = Vec::new();
        for entity in &window {
            if normalize(&entity.name) == normalized_candidate
                || entity.aliases.iter().any(|a| normalize(a) == normalized_candidate)
            {
                results.push(ResolvedCandidate { entity_id: entity.id, similarity: 1.0 });
            } else {
                remaining.push(entity);
            }
        }

        // Phase 2: Levenshtein similarity over the rest.
        let mut shortlist: Vec<ResolvedCandidate> = remaining
            .iter()
            .filter_map(|entity| {
                let similarity = levenshtein_similarity(&normalized_candidate, &normalize(&entity.name));
                (similarity >= LEVENSHTEIN_FLOOR).then_some(ResolvedCandidate { entity_id: entity.id, similarity })
            })
            .collect();

        // Phase 3: cross-encoder rerank, only if the shortlist size is in [1, 30).
        if let Some(reranker) = &self.reranker {
            if !shortlist.is_empty() && shortlist.len() < RERANK_SHORTLIST_MAX {
                let docs: Vec<String> = shortlist
                    .iter()
                    .map(|c| {
                        window
                            .iter()
                            .find(|e| e.id == c.entity_id)
                            .map(|e| e.name.clone())
                            .unwrap_or_default()
                    })
                    .collect();
                if let Ok(reranked) = reranker.rerank(candidate_name, &docs, docs.len()).await {
                    for r in reranked {
                        if let Some(entry) = shortlist.get_mut(r.index) {
                            if f64::from(r.score) > entry.similarity {
                                entry.similarity = f64::from(r.score);
                            }
                        }
                    }
                }
            }
        }

        results.extend(shortlist);
        results.retain(|c| c.similarity >= threshold);
        results.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal));
        results
    }

    /// Whether the best [`ResolvedCandidate`] clears the stricter auto-merge bar.
    #[must_use]
    pub fn should_auto_merge(best: Option<&ResolvedCandidate>) -> bool {
        best.is_some_and(|c| c.similarity >= AUTO_MERGE_THRESHOLD)
    }
}

fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}
