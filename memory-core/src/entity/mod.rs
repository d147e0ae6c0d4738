//! # Extracted Entity types, Classifier (C3), and Resolver (C4)

pub mod classifier;
pub mod extractor;
pub mod resolver;

use crate::tenant::TenantContext;
use crate::temporal_extract::TemporalType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub use classifier::EntityClassifier;
pub use extractor::EntityFactExtractor;
pub use resolver::EntityResolver;

/// Entity category (§3 Extracted Entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Concept,
    Technology,
    File,
    Function,
    Temporal,
    Other,
}

impl EntityType {
    /// Parse a loosely-cased string, coercing unknown values to [`EntityType::Other`].
    #[must_use]
    pub fn parse_or_other(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "person" => Self::Person,
            "organization" | "org" => Self::Organization,
            "location" | "place" => Self::Location,
            "concept" => Self::Concept,
            "technology" | "tech" => Self::Technology,
            "file" => Self::File,
            "function" => Self::Function,
            "temporal" => Self::Temporal,
            _ => Self::Other,
        }
    }
}

/// A single extracted entity (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub id: Uuid,
    pub name: String,
    pub entity_type: EntityType,
    pub confidence: f32,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub mention_count: u32,
    pub salience: f32,
    pub aliases: HashSet<String>,
    pub tenant: TenantContext,
    /// Required when `entity_type == EntityType::Temporal`.
    pub temporal_type: Option<TemporalType>,
    /// Required when `entity_type == EntityType::Temporal`.
    pub normalized_value: Option<String>,
}

impl ExtractedEntity {
    /// Construct a freshly-seen entity mentioned once.
    #[must_use]
    pub fn new(name: impl Into<String>, entity_type: EntityType, confidence: f32, tenant: TenantContext) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entity_type,
            confidence: confidence.clamp(0.0, 1.0),
            first_seen: now,
            last_seen: now,
            mention_count: 1,
            salience: 0.0,
            aliases: HashSet::new(),
            tenant,
            temporal_type: None,
            normalized_value: None,
        }
    }

    /// Merge an incoming mention into this (existing) entity (§4.7 auto-merge).
    ///
    /// The candidate name is appended as an alias, `mention_count` is
    /// incremented, `last_seen` advances, and `salience` is averaged with
    /// the new mention's salience.
    pub fn merge_mention(&mut self, candidate_name: &str, new_salience: f32, seen_at: DateTime<Utc>) {
        if candidate_name != self.name {
            self.aliases.insert(candidate_name.to_string());
        }
        self.mention_count += 1;
        self.last_seen = self.last_seen.max(seen_at);
        self.salience = (self.salience + new_salience.clamp(0.0, 1.0)) / 2.0;
    }
}

/// Compute intra-content salience per §4.5:
/// `min(mentions·0.2 + (1 − firstPosition/len)·0.3, 1.0)`.
#[must_use]
pub fn salience(mentions: u32, first_position: usize, content_len: usize) -> f32 {
    if content_len == 0 {
        return 0.0;
    }
    let position_term = 1.0 - (first_position as f32 / content_len as f32);
    (mentions as f32 * 0.2 + position_term * 0.3).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantContext {
        TenantContext::new("acme", "chat", "alice")
    }

    #[test]
    fn merge_mention_accumulates_aliases_and_averages_salience() {
        let mut entity = ExtractedEntity::new("Emily Chen", EntityType::Person, 0.9, tenant());
        entity.salience = 0.4;
        entity.merge_mention("Dr. Emily Chen", 0.8, Utc::now());
        assert!(entity.aliases.contains("Dr. Emily Chen"));
        assert_eq!(entity.mention_count, 2);
        assert!((entity.salience - 0.6).abs() < 1e-6);
    }

    #[test]
    fn merge_mention_is_noop_alias_for_identical_name() {
        let mut entity = ExtractedEntity::new("Emily Chen", EntityType::Person, 0.9, tenant());
        entity.merge_mention("Emily Chen", 0.5, Utc::now());
        assert!(entity.aliases.is_empty());
    }

    #[test]
    fn salience_clamps_to_one() {
        assert!((salience(10, 0, 100) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn salience_zero_for_empty_content() {
        assert_eq!(salience(1, 0, 0), 0.0);
    }

    #[test]
    fn entity_type_coerces_unknown_to_other() {
        assert_eq!(EntityType::parse_or_other("spaceship"), EntityType::Other);
        assert_eq!(EntityType::parse_or_other("Person"), EntityType::Person);
    }
}
