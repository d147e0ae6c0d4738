//! # Extracted Fact (§3) and fact-side of the Entity/Fact Extractor (C5)

use crate::tenant::TenantContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted object length (§4.5, env `FACT_MIN_OBJECT_LENGTH`).
pub const MIN_OBJECT_LENGTH: usize = 5;
/// Maximum accepted object length (§4.5, env `FACT_MAX_OBJECT_LENGTH`).
pub const MAX_OBJECT_LENGTH: usize = 100;
/// Maximum facts retained per episode (§4.5, env `MAX_FACTS_PER_EPISODE`).
pub const MAX_FACTS_PER_EPISODE: usize = 10;

/// A subject/predicate/object fact extracted from an episode (§3).
///
/// Facts are append-only: [`Fact::validate`] toggles `is_valid` without
/// erasing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub id: Uuid,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub confidence: f32,
    pub source_episode_id: Uuid,
    pub extracted_at: DateTime<Utc>,
    pub validity_period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub is_valid: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub tenant: TenantContext,
}

impl Fact {
    /// Construct a fact, clamping confidence to `[0,1]`.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        confidence: f32,
        source_episode_id: Uuid,
        tenant: TenantContext,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source_episode_id,
            extracted_at: Utc::now(),
            validity_period: None,
            is_valid: true,
            validated_at: None,
            tenant,
        }
    }

    /// Derived "S P O" content string (§3).
    #[must_use]
    pub fn content(&self) -> String {
        format!("{} {} {}", self.subject, self.predicate, self.object)
    }

    /// Toggle validity, timestamping `validated_at`; history is never erased.
    pub fn validate(&mut self, is_valid: bool) {
        self.is_valid = is_valid;
        self.validated_at = Some(Utc::now());
    }

    /// Case-insensitive `subject:predicate:object` dedup key (§4.5).
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.subject.to_lowercase(),
            self.predicate.to_lowercase(),
            self.object.to_lowercase()
        )
    }

    /// Whether `object` meets the length bounds for a persisted fact (§4.5).
    #[must_use]
    pub fn object_length_valid(object: &str) -> bool {
        let len = object.chars().count();
        (MIN_OBJECT_LENGTH..=MAX_OBJECT_LENGTH).contains(&len)
    }
}

/// Drop exact duplicates (by [`Fact::dedup_key`]) and cap to [`MAX_FACTS_PER_EPISODE`].
#[must_use]
pub fn dedup_and_cap(mut facts: Vec<Fact>) -> Vec<Fact> {
    let mut seen = std::collections::HashSet::new();
    facts.retain(|f| seen.insert(f.dedup_key()));
    facts.truncate(MAX_FACTS_PER_EPISODE);
    facts
}
