//! Hybrid pattern extractor
//!
//! Runs multiple specialized extractors in parallel and combines results.

use super::{
    cluster_similar_patterns, ContextPatternExtractor, DecisionPointExtractor,
    ErrorRecoveryExtractor, PatternExtractor as PatternExtractorTrait, ToolSequenceExtractor,
};
use crate::episode::Episode;
use crate::pattern::Pattern;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

/// Hybrid extractor that runs multiple extractors in parallel
pub struct HybridPatternExtractor {
    extractors: Vec<Box<dyn PatternExtractorTrait>>,
    confidence_threshold: f32,
    enable_clustering: bool,
}

impl Default for HybridPatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HybridPatternExtractor {
    /// Create a new hybrid extractor with all default extractors
    #[must_use]
    pub fn new() -> Self {
        let extractors: Vec<Box<dyn PatternExtractorTrait>> = vec![
            Box::new(ToolSequenceExtractor::new()),
            Box::new(DecisionPointExtractor::new()),
            Box::new(ErrorRecoveryExtractor::new()),
            Box::new(ContextPatternExtractor::new()),
        ];

        Self {
            extractors,
            confidence_threshold: 0.7,
            enable_clustering: true,
        }
    }

    /// Create with custom extractors
    #[must_use]
    pub fn with_extractors(extractors: Vec<Box<dyn PatternExtractorTrait>>) -> Self {
        Self {
            extractors,
            confidence_threshold: 0.7,
            enable_clustering: true,
        }
    }

    /// Set confidence threshold for filtering patterns
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Enable or disable clustering
    #[must_use]
    pub fn with_clustering(mut self, enable: bool) -> Self {
        self.enable_clustering = enable;
        self
    }

    /// Extract patterns using all extractors in parallel
    #[instrument(skip(self, episode), fields(episode_id = %episode.episode_id))]
    pub async fn extract_patterns(&self, episode: &Episode) -> Result<Vec<Pattern>> {
        let start = Instant::now();

        // Create Arc for shared episode access
        let episode = Arc::new(episode.clone());
        let mut handles = Vec::new();

        // Spawn parallel extraction tasks
        for extractor in &self.extractors {
            let episode_clone = Arc::clone(&episode);
            let extractor_name = extractor.name().to_string();

            // Note: We can't use tokio::spawn directly with trait objects easily,
            // so we'll extract sequentially but with async/await for now.
            // For true parallelism, we could use channels or other patterns.
            let patterns = extractor.extract(&episode_clone).await?;
            debug!(
                extractor = %extractor_name,
                pattern_count = patterns.len(),
                "Extractor completed"
            );
            handles.push(patterns);
        }

        // Combine all patterns
        let mut all_patterns: Vec<Pattern> = handles.into_iter().flatten().collect();

        debug!(
            total_patterns = all_patterns.len(),
            "Combined patterns from all extractors"
        );

        // Filter by confidence threshold
        all_patterns.retain(|p| p.success_rate() >= self.confidence_threshold);

        debug!(
            filtered_patterns = all_patterns.len(),
            threshold = self.confidence_threshold,
            "Filtered patterns by confidence"
        );

        // Deduplicate and cluster if enabled
        let final_patterns = if self.enable_clustering {
            let clustered = cluster_similar_patterns(all_patterns);
            debug!(
                clustered_patterns = clustered.len(),
                "Clustered similar patterns"
            );
            clustered
        } else {
            all_patterns
        };

        let duration = start.elapsed();
        debug!(
            duration_ms = duration.as_millis(),
            final_count = final_patterns.len(),
            "Pattern extraction complete"
        );

        Ok(final_patterns)
    }

    /// Get the number of registered extractors
    #[must_use]
    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    /// Get names of all registered extractors
    #[must_use]
    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }
}

#[async_trait]
impl PatternExtractorTrait for HybridPatternExtractor {
    async fn extract(&self, episode: &Episode) -> Result<Vec<Pattern>> {
        self.extract_patterns(episode).await
    }

    fn name(&self) -> &'static str {
        "HybridPatternExtractor"
    }

    fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}
