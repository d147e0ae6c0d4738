//! Capacity management logic
//!
//! Provides eviction policies and management logic for capacity-constrained
//! episodic storage.

use crate::episode::Episode;
use std::cmp::Ordering;
use uuid::Uuid;

use super::calculator::CapacityManager;

impl CapacityManager {
    /// Evict episodes using LRU policy.
    ///
    /// Returns the oldest episodes (by `end_time` or `start_time`).
    fn evict_lru(&self, episodes: &[Episode], count: usize) -> Vec<Uuid> {
        let mut episodes_with_time: Vec<_> = episodes
            .iter()
            .map(|e| {
                let time = e.end_time.unwrap_or(e.start_time);
                (e.episode_id, time)
            })
            .collect();

        // Sort by time (oldest first)
        episodes_with_time.sort_by(|a, b| a.1.cmp(&b.1));

        // Take the oldest N episodes
        episodes_with_time
            .iter()
            .take(count)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Evict episodes using relevance-weighted policy.
    ///
    /// Returns episodes with lowest relevance scores.
    fn evict_relevance_weighted(&self, episodes: &[Episode], count: usize) -> Vec<Uuid> {
        let mut episodes_with_scores: Vec<_> = episodes
            .iter()
            .map(|e| {
                let score = self.relevance_score(e);
                (e.episode_id, score)
            })
            .collect();

        // Sort by relevance score (lowest first)
        episodes_with_scores.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        // Take the lowest-scoring N episodes
        episodes_with_scores
            .iter()
            .take(count)
            .map(|(id, _)| *id)
            .collect()
    }
}
