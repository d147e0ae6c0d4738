//! # Memory Item and Episode schema (C9, §3)

pub mod store;

pub use store::{EpisodeStore, StoreEpisodeResult};

use crate::tenant::TenantContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Minimum accepted content length (§4.8).
pub const MIN_CONTENT_LEN: usize = 10;
/// Maximum accepted content length (§4.8).
pub const MAX_CONTENT_LEN: usize = 8000;
/// Maximum accepted summary length (§3).
pub const MAX_SUMMARY_LEN: usize = 300;

/// Kind of interaction an [`EpisodeRecord`] captures (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeType {
    UserQuery,
    SystemResponse,
    DocumentInteraction,
    EntityMention,
    Summary,
    Event,
    Observation,
    Insight,
}

/// A plain, non-episodic memory item: created by the storage API, content
/// immutable, importance mutable via administrative update (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: Uuid,
    pub content: String,
    pub tags: HashSet<String>,
    pub timestamp: DateTime<Utc>,
    pub importance: f32,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub tenant: TenantContext,
}

impl MemoryItem {
    #[must_use]
    pub fn new(content: impl Into<String>, importance: f32, tenant: TenantContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            tags: HashSet::new(),
            timestamp: Utc::now(),
            importance: importance.clamp(0.0, 1.0),
            metadata: BTreeMap::new(),
            tenant,
        }
    }
}

/// A Memory Item specialized to a single interaction or observation (§3).
///
/// `(content_hash, company_id, app_id, user_id|"system")` is unique: the
/// episode store returns the existing id on a duplicate write rather than
/// erroring or re-inserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub item: MemoryItem,
    pub episode_type: EpisodeType,
    pub summary: Option<String>,
    pub content_hash: String,
    pub decay_rate: f32,
    pub has_embedding: bool,
    pub entities: Vec<Uuid>,
    pub facts: Vec<Uuid>,
    pub consolidated: bool,
    pub interaction_id: Option<String>,
}

impl EpisodeRecord {
    /// Construct a new episode, deriving `content_hash` and `decay_rate`
    /// from `content`/`importance` (§3).
    ///
    /// # Panics
    ///
    /// Panics if `summary` exceeds [`MAX_SUMMARY_LEN`] characters — callers
    /// must truncate/validate before construction.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        episode_type: EpisodeType,
        importance: f32,
        tenant: TenantContext,
    ) -> Self {
        let content = content.into();
        let content_hash = content_hash(&content);
        let importance = importance.clamp(0.0, 1.0);
        Self {
            item: MemoryItem::new(content, importance, tenant),
            episode_type,
            summary: None,
            content_hash,
            decay_rate: decay_rate(importance),
            has_embedding: false,
            entities: Vec::new(),
            facts: Vec::new(),
            consolidated: false,
            interaction_id: None,
        }
    }

    #[must_use]
    pub fn with_interaction_id(mut self, interaction_id: impl Into<String>) -> Self {
        self.interaction_id = Some(interaction_id.into());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        let summary = summary.into();
        let truncated: String = summary.chars().take(MAX_SUMMARY_LEN).collect();
        self.summary = Some(truncated);
        self
    }

    /// Decayed importance at `now`, per §4.9 consolidation formula:
    /// `importance · exp(−decay_rate · days)`.
    #[must_use]
    pub fn decayed_importance(&self, now: DateTime<Utc>) -> f32 {
        let days = (now - self.item.timestamp).num_seconds() as f32 / 86_400.0;
        self.item.importance * (-self.decay_rate * days.max(0.0)).exp()
    }
}

/// `decay_rate = 0.1 · (1 − importance)` (§3).
#[must_use]
pub fn decay_rate(importance: f32) -> f32 {
    0.1 * (1.0 - importance.clamp(0.0, 1.0))
}

/// 16-hex-character hash of normalized content (§3), derived from the
/// first 8 bytes of its SHA-256 digest.
#[must_use]
pub fn content_hash(normalized_content: &str) -> String {
    let digest = Sha256::digest(normalized_content.as_bytes());
    digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
}

/// Whether `content`'s length falls within the accepted bounds (§4.8).
#[must_use]
pub fn content_length_valid(content: &str) -> bool {
    let len = content.chars().count();
    (MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantContext {
        TenantContext::new("acme", "chat", "alice")
    }

    #[test]
    fn content_hash_is_sixteen_hex_chars() {
        let hash = content_hash("hello world");
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn content_hash_is_deterministic() {
        assert_eq!(content_hash("same"), content_hash("same"));
        assert_ne!(content_hash("same"), content_hash("different"));
    }

    #[test]
    fn decay_rate_zero_at_full_importance() {
        assert!((decay_rate(1.0)).abs() < 1e-6);
        assert!((decay_rate(0.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn new_episode_derives_hash_and_decay_rate() {
        let episode = EpisodeRecord::new("Hello world, this is a test.", EpisodeType::Event, 0.5, tenant());
        assert_eq!(episode.content_hash, content_hash("Hello world, this is a test."));
        assert!((episode.decay_rate - 0.05).abs() < 1e-6);
    }

    #[test]
    fn summary_is_truncated_to_max_len() {
        let episode = EpisodeRecord::new("content", EpisodeType::Event, 0.5, tenant())
            .with_summary("x".repeat(400));
        assert_eq!(episode.summary.unwrap().chars().count(), MAX_SUMMARY_LEN);
    }

    #[test]
    fn decayed_importance_shrinks_over_time() {
        let mut episode = EpisodeRecord::new("content", EpisodeType::Event, 0.8, tenant());
        episode.item.timestamp = Utc::now() - chrono::Duration::days(30);
        let decayed = episode.decayed_importance(Utc::now());
        assert!(decayed < episode.item.importance);
    }

    #[test]
    fn content_length_bounds() {
        assert!(!content_length_valid("hi"));
        assert!(content_length_valid("this is long enough"));
        assert!(!content_length_valid(&"x".repeat(9000)));
    }
}
