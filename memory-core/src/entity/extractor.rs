//! # Entity/Fact Extractor (C5)
//!
//! Two entity-extraction paths — LLM JSON extraction over the first 2000
//! characters of content, falling back to a regex/stopword heuristic scan —
//! followed by temporal-entity fusion and a salience-sorted cap. Fact
//! extraction mines subject/predicate/object triples and decision markers
//! from the same content.

use crate::fact::{self, Fact};
use crate::rerank::EntityExtractionLlm;
use crate::tenant::TenantContext;
use crate::temporal_extract::TemporalExtractor;
use crate::Result;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use super::{classifier::heuristic_classify, salience, EntityType, ExtractedEntity};

/// Default cap on entities retained per episode (§4.5, env `MAX_ENTITIES_PER_EPISODE`).
pub const DEFAULT_MAX_PER_EPISODE: usize = 20;

/// Characters of content sent to the LLM extraction path (§4.5).
const LLM_EXCERPT_CHARS: usize = 2000;

static CAPITALIZED_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-zA-Z0-9]*(?:\s+[A-Z][a-zA-Z0-9]*){0,3})\b").expect("valid regex"));

static DECISION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(decided to|will use|chose|opted for|going with)\s+(.{5,100}?)[.\n]")
        .expect("valid regex")
});

static FACT_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Z][\w'-]*(?:\s+[A-Z][\w'-]*){0,2})\s+(is|are|was|were|has|have|uses|supports|requires)\s+(.{5,100}?)[.\n]")
        .expect("valid regex")
});

/// Sentence-leading/closing words that are capitalized but never entities.
fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
        [
            "The", "This", "That", "These", "Those", "It", "We", "They", "He", "She", "I",
            "A", "An", "And", "But", "Or", "So", "If", "When", "While", "After", "Before",
            "Today", "Tomorrow", "Yesterday",
        ]
        .into_iter()
        .collect()
    });
    &STOPWORDS
}

fn is_non_entity_phrase(phrase: &str) -> bool {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.split_whitespace().count() == 1 && stopwords().contains(trimmed) {
        return true;
    }
    trimmed.chars().all(|c| !c.is_alphabetic())
}

/// A regex-extracted candidate name, its first byte offset, and raw mention count.
struct Candidate {
    name: String,
    first_position: usize,
    mentions: u32,
}

fn regex_candidates(content: &str) -> Vec<Candidate> {
    let mut by_name: Vec<Candidate> = Vec::new();
    for m in CAPITALIZED_PHRASE.find_iter(content) {
        let text = m.as_str();
        if is_non_entity_phrase(text) {
            continue;
        }
        if let Some(existing) = by_name.iter_mut().find(|c| c.name == text) {
            existing.mentions += 1;
        } else {
            by_name.push(Candidate { name: text.to_string(), first_position: m.start(), mentions: 1 });
        }
    }
    by_name
}

/// Coordinates LLM + regex entity extraction, temporal fusion, and fact mining.
pub struct EntityFactExtractor {
    llm: Option<Arc<dyn EntityExtractionLlm>>,
    enable_regex_fallback: bool,
    max_per_episode: usize,
    min_name_length: usize,
    min_confidence: f32,
}

impl Default for EntityFactExtractor {
    fn default() -> Self {
        Self::new(None, true, DEFAULT_MAX_PER_EPISODE)
    }
}

impl EntityFactExtractor {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn EntityExtractionLlm>>, enable_regex_fallback: bool, max_per_episode: usize) -> Self {
        Self { llm, enable_regex_fallback, max_per_episode, min_name_length: 0, min_confidence: 0.0 }
    }

    /// Construct from the extraction thresholds (§6), in addition to the
    /// collaborators [`new`](Self::new) takes directly.
    #[must_use]
    pub fn from_config(llm: Option<Arc<dyn EntityExtractionLlm>>, config: &crate::types::ExtractionConfig) -> Self {
        Self {
            llm,
            enable_regex_fallback: config.enable_regex_entity_fallback,
            max_per_episode: config.max_entities_per_episode,
            min_name_length: config.entity_min_name_length,
            min_confidence: config.entity_min_confidence,
        }
    }

    /// Extract entities from `content`, fusing in temporal matches, dropping
    /// anything below the configured name-length/confidence bar, and capping
    /// to `max_per_episode` by descending salience (§4.5).
    pub async fn extract_entities(&self, content: &str, tenant: &TenantContext) -> Vec<ExtractedEntity> {
        let mut entities = self.extract_via_llm_or_regex(content, tenant).await;
        self.fuse_temporal_entities(content, tenant, &mut entities);
        entities.retain(|e| is_persistable(&e.name, e.confidence, self.min_name_length, self.min_confidence));

        entities.sort_by(|a, b| b.salience.partial_cmp(&a.salience).unwrap_or(std::cmp::Ordering::Equal));
        entities.truncate(self.max_per_episode);
        entities
    }

    async fn extract_via_llm_or_regex(&self, content: &str, tenant: &TenantContext) -> Vec<ExtractedEntity> {
        if let Some(llm) = &self.llm {
            let excerpt: String = content.chars().take(LLM_EXCERPT_CHARS).collect();
            if let Ok(extracted) = llm.extract_entities(&excerpt).await {
                if !extracted.is_empty() {
                    return extracted
                        .into_iter()
                        .map(|e| {
                            let entity_type = EntityType::parse_or_other(&e.entity_type);
                            let position = content.find(&e.name).unwrap_or(0);
                            let mut entity = ExtractedEntity::new(e.name, entity_type, e.confidence, tenant.clone());
                            entity.salience = salience(1, position, content.len().max(1));
                            entity
                        })
                        .collect();
                }
            }
        }

        if self.enable_regex_fallback {
            return regex_candidates(content)
                .into_iter()
                .map(|c| {
                    let (entity_type, confidence) = heuristic_classify(&c.name);
                    let mut entity = ExtractedEntity::new(c.name, entity_type, confidence, tenant.clone());
                    entity.mention_count = c.mentions;
                    entity.salience = salience(c.mentions, c.first_position, content.len().max(1));
                    entity
                })
                .collect();
        }

        Vec::new()
    }

    fn fuse_temporal_entities(&self, content: &str, tenant: &TenantContext, entities: &mut Vec<ExtractedEntity>) {
        let temporal = TemporalExtractor::default();
        for m in temporal.extract(content) {
            if entities.iter().any(|e| e.name == m.text) {
                continue;
            }
            let mut entity = ExtractedEntity::new(m.text.clone(), EntityType::Temporal, 0.9, tenant.clone());
            entity.temporal_type = Some(m.temporal_type);
            entity.normalized_value = Some(m.normalized_value);
            entity.salience = salience(1, m.start, content.len().max(1));
            entities.push(entity);
        }
    }

    /// Extract subject/predicate/object facts and decision markers from
    /// `content`, deduped and capped (§4.5).
    #[must_use]
    pub fn extract_facts(&self, content: &str, source_episode_id: Uuid, tenant: &TenantContext) -> Vec<Fact> {
        let mut facts = Vec::new();

        for caps in FACT_TRIPLE.captures_iter(content) {
            let subject = caps[1].trim();
            let predicate = caps[2].trim();
            let object = caps[3].trim();
            if !Fact::object_length_valid(object) {
                continue;
            }
            facts.push(Fact::new(subject, predicate, object, 0.7, source_episode_id, tenant.clone()));
        }

        for caps in DECISION_MARKER.captures_iter(content) {
            let marker = caps[1].trim();
            let object = caps[2].trim();
            if !Fact::object_length_valid(object) {
                continue;
            }
            facts.push(Fact::new("decision", marker.to_lowercase(), object, 0.8, source_episode_id, tenant.clone()));
        }

        fact::dedup_and_cap(facts)
    }
}

/// Validate that a `(name, confidence)` pair meets the minimum bar for
/// persistence (§6 `MIN_NAME_LENGTH`/`MIN_CONFIDENCE` config).
#[must_use]
pub fn is_persistable(name: &str, confidence: f32, min_name_length: usize, min_confidence: f32) -> bool {
    name.trim().chars().count() >= min_name_length && confidence >= min_confidence
}

/// No-op placeholder kept for API symmetry with [`EntityExtractionLlm`]; all
/// extraction paths return `Ok` by construction since errors are swallowed
/// at the collaborator boundary (§4.5).
pub fn always_ok() -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantContext {
        TenantContext::new("acme", "chat", "alice")
    }

    #[tokio::test]
    async fn regex_fallback_extracts_capitalized_entities() {
        let extractor = EntityFactExtractor::default();
        let entities = extractor
            .extract_entities("Emily Chen joined Anthropic in San Francisco.", &tenant())
            .await;
        assert!(entities.iter().any(|e| e.name == "Emily Chen"));
        assert!(entities.iter().any(|e| e.name == "Anthropic"));
    }

    #[tokio::test]
    async fn stopwords_are_excluded() {
        let extractor = EntityFactExtractor::default();
        let entities = extractor.extract_entities("The meeting starts soon.", &tenant()).await;
        assert!(!entities.iter().any(|e| e.name == "The"));
    }

    #[tokio::test]
    async fn temporal_entities_are_fused_without_duplication() {
        let extractor = EntityFactExtractor::default();
        let entities = extractor
            .extract_entities("We meet on 2024-03-01 to discuss Rust.", &tenant())
            .await;
        assert!(entities.iter().any(|e| e.entity_type == EntityType::Temporal));
    }

    #[tokio::test]
    async fn entities_are_capped_and_sorted_by_salience() {
        let extractor = EntityFactExtractor::new(None, true, 2);
        let entities = extractor
            .extract_entities("Alice met Bob and Carol and Dave in Boston.", &tenant())
            .await;
        assert!(entities.len() <= 2);
        if entities.len() == 2 {
            assert!(entities[0].salience >= entities[1].salience);
        }
    }

    #[test]
    fn extract_facts_finds_subject_predicate_object() {
        let extractor = EntityFactExtractor::default();
        let facts = extractor.extract_facts(
            "Rust is a memory-safe systems language.",
            Uuid::new_v4(),
            &tenant(),
        );
        assert!(facts.iter().any(|f| f.subject == "Rust" && f.predicate == "is"));
    }

    #[test]
    fn extract_facts_finds_decision_markers() {
        let extractor = EntityFactExtractor::default();
        let facts = extractor.extract_facts(
            "We decided to use PostgreSQL for storage.",
            Uuid::new_v4(),
            &tenant(),
        );
        assert!(facts.iter().any(|f| f.subject == "decision"));
    }

    #[test]
    fn facts_are_capped_at_ten() {
        let extractor = EntityFactExtractor::default();
        let content: String = (0..15).map(|i| format!("Rust supports feature number {i} well.\n")).collect();
        let facts = extractor.extract_facts(&content, Uuid::new_v4(), &tenant());
        assert!(facts.len() <= fact::MAX_FACTS_PER_EPISODE);
    }

    #[test]
    fn is_persistable_enforces_bounds() {
        assert!(is_persistable("Emily Chen", 0.8, 2, 0.5));
        assert!(!is_persistable("E", 0.8, 2, 0.5));
        assert!(!is_persistable("Emily Chen", 0.2, 2, 0.5));
    }
}
