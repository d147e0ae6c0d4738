//! # Entity Classifier (C3)
//!
//! Three tiers, consulted in order, first match wins: a process-wide name
//! cache, a cross-encoder reranker over candidate `type: description`
//! strings, and an LLM classifier. A heuristic tiebreak is the final
//! fallback when neither collaborator is configured or both fail.

use super::EntityType;
use crate::rerank::{CrossEncoderReranker, EntityTypeLlm};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

const TYPE_DESCRIPTIONS: &[(EntityType, &str)] = &[
    (EntityType::Person, "person: a named human individual"),
    (EntityType::Organization, "organization: a company, institution, or group"),
    (EntityType::Location, "location: a place, city, country, or address"),
    (EntityType::Concept, "concept: an abstract idea or subject matter"),
    (EntityType::Technology, "technology: a software product, language, or protocol"),
    (EntityType::File, "file: a filesystem path or filename"),
    (EntityType::Function, "function: a code function or method name"),
];

static FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w./\\-]+\.[A-Za-z0-9]{1,6}$|[/\\]").expect("valid regex"));
static CAMEL_CASE_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*[A-Z][a-zA-Z0-9]*$|^[a-z_]+\(\)$").expect("valid regex"));
static KNOWN_TECH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(rust|python|javascript|typescript|react|kubernetes|docker|postgres|redis|kafka|graphql|grpc)$")
        .expect("valid regex")
});
static LOCATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(city|county|street|avenue|road|state|province)$").expect("valid regex"));
static TWO_TOKEN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$").expect("valid regex"));

fn curated_seed() -> HashMap<String, (EntityType, f32)> {
    let seed: &[(&str, EntityType)] = &[
        ("rust", EntityType::Technology),
        ("python", EntityType::Technology),
        ("javascript", EntityType::Technology),
        ("typescript", EntityType::Technology),
        ("kubernetes", EntityType::Technology),
        ("docker", EntityType::Technology),
        ("postgres", EntityType::Technology),
        ("redis", EntityType::Technology),
        ("openai", EntityType::Organization),
        ("anthropic", EntityType::Organization),
        ("google", EntityType::Organization),
        ("microsoft", EntityType::Organization),
        ("new york", EntityType::Location),
        ("san francisco", EntityType::Location),
        ("london", EntityType::Location),
    ];
    seed.iter().map(|(name, t)| (name.to_string(), (*t, 0.99))).collect()
}

/// Heuristic tiebreak used as the final fallback (§4.6).
#[must_use]
pub fn heuristic_classify(name: &str) -> (EntityType, f32) {
    if FILE_PATH.is_match(name) {
        return (EntityType::File, 0.6);
    }
    if CAMEL_CASE_FN.is_match(name) {
        return (EntityType::Function, 0.6);
    }
    if KNOWN_TECH.is_match(name) {
        return (EntityType::Technology, 0.6);
    }
    if TWO_TOKEN_NAME.is_match(name) && !LOCATION_SUFFIX.is_match(name) {
        return (EntityType::Person, 0.6);
    }
    (EntityType::Other, 0.6)
}

/// Two-tier classifier (reranker → LLM) with a process-wide name cache and
/// heuristic fallback.
pub struct EntityClassifier {
    name_cache: Arc<RwLock<HashMap<String, (EntityType, f32)>>>,
    reranker: Option<Arc<dyn CrossEncoderReranker>>,
    llm: Option<Arc<dyn EntityTypeLlm>>,
    medium_confidence: f32,
}

impl Default for EntityClassifier {
    fn default() -> Self {
        Self::new(None, None, 0.7)
    }
}

impl EntityClassifier {
    /// Construct a classifier with optional reranker/LLM collaborators.
    #[must_use]
    pub fn new(
        reranker: Option<Arc<dyn CrossEncoderReranker>>,
        llm: Option<Arc<dyn EntityTypeLlm>>,
        medium_confidence: f32,
    ) -> Self {
        Self {
            name_cache: Arc::new(RwLock::new(curated_seed())),
            reranker,
            llm,
            medium_confidence,
        }
    }

    /// Classify `name`, using `context_excerpt` as prompt context for LLM/reranker tiers.
    pub async fn classify(&self, name: &str, context_excerpt: &str) -> (EntityType, f32) {
        let lowered = name.to_lowercase();

        if let Some(cached) = self
            .name_cache
            .read()
            .expect("EntityClassifier: name cache lock poisoned - this indicates a panic while holding the lock")
            .get(&lowered)
            .copied()
        {
            return cached;
        }

        if let Some(reranker) = &self.reranker {
            let candidates: Vec<String> =
                TYPE_DESCRIPTIONS.iter().map(|(_, desc)| (*desc).to_string()).collect();
            if let Ok(mut ranked) = reranker.rerank(name, &candidates, 1).await {
                if let Some(best) = ranked.pop() {
                    if best.score >= self.medium_confidence {
                        let entity_type = TYPE_DESCRIPTIONS[best.index].0;
                        self.cache_result(&lowered, entity_type, best.score);
                        return (entity_type, best.score);
                    }
                }
            }
        }

        if let Some(llm) = &self.llm {
            if let Ok(result) = llm.classify(name, context_excerpt).await {
                let entity_type = EntityType::parse_or_other(&result.entity_type);
                let confidence = result.confidence.clamp(0.0, 1.0);
                self.cache_result(&lowered, entity_type, confidence);
                return (entity_type, confidence);
            }
        }

        heuristic_classify(name)
    }

    fn cache_result(&self, lowered_name: &str, entity_type: EntityType, confidence: f32) {
        self.name_cache
            .write()
            .expect("EntityClassifier: name cache lock poisoned - this indicates a panic while holding the lock")
            .insert(lowered_name.to_string(), (entity_type, confidence));
    }
}
