//! Hybrid scoring formulas for the Recall Engine (§3 Hybrid Score, §4.10 step 7).

use crate::entity::ExtractedEntity;
use serde::Serialize;
use uuid::Uuid;

/// Half-life, in days, for the recency decay curve (§4.10).
const RECENCY_HALF_LIFE_DAYS: f64 = 7.0;
/// Floor applied to the recency factor so very old episodes are never scored zero (§4.10).
const RECENCY_FLOOR: f32 = 0.01;

/// Query/entity/recency/importance weights, merged with caller overrides
/// and renormalized to sum to 1.0 (§4.10 step 3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecallWeights {
    pub vector: f32,
    pub entity: f32,
    pub recency: f32,
    pub importance: f32,
}

impl Default for RecallWeights {
    fn default() -> Self {
        Self { vector: 0.4, entity: 0.25, recency: 0.2, importance: 0.15 }
    }
}

impl RecallWeights {
    /// Renormalize so the four weights sum to 1.0, no-op if they already do.
    #[must_use]
    pub fn renormalized(self) -> Self {
        let sum = self.vector + self.entity + self.recency + self.importance;
        if sum <= 0.0 || (sum - 1.0).abs() < 1e-6 {
            return self;
        }
        Self { vector: self.vector / sum, entity: self.entity / sum, recency: self.recency / sum, importance: self.importance / sum }
    }
}

/// `{vector_similarity, entity_relevance, recency_factor, importance, final_score, weights_applied}` (§3).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HybridScore {
    pub vector_similarity: f32,
    pub entity_relevance: f32,
    pub recency_factor: f32,
    pub importance: f32,
    pub final_score: f32,
    pub weights_applied: RecallWeights,
}

impl HybridScore {
    /// Weighted sum of the four component scores, each clamped to `[0,1]`
    /// before combining, with the final value clamped again (§3).
    #[must_use]
    pub fn compute(vector_similarity: f32, entity_relevance: f32, recency_factor: f32, importance: f32, weights: &RecallWeights) -> Self {
        let vector_similarity = vector_similarity.clamp(0.0, 1.0);
        let entity_relevance = entity_relevance.clamp(0.0, 1.0);
        let recency_factor = recency_factor.clamp(0.0, 1.0);
        let importance = importance.clamp(0.0, 1.0);
        let final_score = (vector_similarity * weights.vector
            + entity_relevance * weights.entity
            + recency_factor * weights.recency
            + importance * weights.importance)
            .clamp(0.0, 1.0);
        Self { vector_similarity, entity_relevance, recency_factor, importance, final_score, weights_applied: *weights }
    }
}

/// `exp(−days·ln2/half_life)` clamped to `[RECENCY_FLOOR, 1.0]` (§4.10).
#[must_use]
pub fn recency_factor(days: i64) -> f32 {
    let days = days.max(0) as f64;
    let decayed = (-days * std::f64::consts::LN_2 / RECENCY_HALF_LIFE_DAYS).exp();
    (decayed as f32).clamp(RECENCY_FLOOR, 1.0)
}

/// Fraction of query entities also present among an episode's adjacent
/// entity ids, matched by name (§4.10 step 7).
#[must_use]
pub fn entity_relevance(query_entities: &[ExtractedEntity], adjacent_entity_ids: &[Uuid]) -> f32 {
    if query_entities.is_empty() {
        return 0.0;
    }
    let matched = query_entities.iter().filter(|e| adjacent_entity_ids.contains(&e.id)).count();
    matched as f32 / query_entities.len() as f32
}
