//! Validation rules for pattern quality
//!
//! Provides pattern validation logic including confidence checking,
//! effectiveness tracking, and pattern matching rules.

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Pattern accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMetrics {
    /// Precision: TP / (TP + FP) - proportion of predicted positives that are correct
    pub precision: f32,
    /// Recall: TP / (TP + FN) - proportion of actual positives that were identified
    pub recall: f32,
    /// F1 Score: 2 * (precision * recall) / (precision + recall) - harmonic mean
    pub f1_score: f32,
    /// Accuracy: (TP + TN) / Total - overall correctness
    pub accuracy: f32,
    /// True Positives
    pub true_positives: usize,
    /// False Positives
    pub false_positives: usize,
    /// False Negatives
    pub false_negatives: usize,
    /// True Negatives
    pub true_negatives: usize,
}

impl PatternMetrics {
    /// Create metrics from confusion matrix counts
    #[must_use]
    pub fn from_counts(tp: usize, fp: usize, fn_: usize, tn: usize) -> Self {
        let precision = if tp + fp > 0 {
            tp as f32 / (tp + fp) as f32
        } else {
            0.0
        };

        let recall = if tp + fn_ > 0 {
            tp as f32 / (tp + fn_) as f32
        } else {
            0.0
        };

        let f1_score = if precision + recall > 0.0 {
            2.0 * (precision * recall) / (precision + recall)
        } else {
            0.0
        };

        let total = tp + fp + fn_ + tn;
        let accuracy = if total > 0 {
            (tp + tn) as f32 / total as f32
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1_score,
            accuracy,
            true_positives: tp,
            false_positives: fp,
            false_negatives: fn_,
            true_negatives: tn,
        }
    }

    /// Check if metrics meet target thresholds
    #[must_use]
    pub fn meets_target(&self, target_precision: f32, target_recall: f32) -> bool {
        self.precision >= target_precision && self.recall >= target_recall
    }

    /// Get overall quality score (0.0 to 1.0)
    #[must_use]
    pub fn quality_score(&self) -> f32 {
        // Weight F1 score (60%), precision (25%), and recall (15%)
        (self.f1_score * 0.6) + (self.precision * 0.25) + (self.recall * 0.15)
    }
}

/// Configuration for pattern validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Minimum confidence threshold for patterns
    pub min_confidence: f32,
    /// Similarity threshold for pattern matching (0.0 to 1.0)
    pub similarity_threshold: f32,
    /// Maximum allowed false positive rate
    pub max_false_positive_rate: f32,
    /// Minimum required recall
    pub min_recall: f32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            similarity_threshold: 0.8,
            max_false_positive_rate: 0.2,
            min_recall: 0.7,
        }
    }
}

/// Pattern validator for calculating accuracy metrics
pub struct PatternValidator {
    config: ValidationConfig,
    /// Cache of confidence scores by pattern ID
    confidence_cache: HashMap<Uuid, f32>,
}

impl PatternValidator {
    /// Create a new validator with default config
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            confidence_cache: HashMap::new(),
        }
    }

    /// Validate that a pattern meets confidence threshold
    #[must_use]
    pub fn validate_confidence(&self, pattern: &Pattern) -> bool {
        let success_rate = pattern.success_rate();
        success_rate >= self.config.min_confidence
    }

    /// Track effectiveness of a pattern usage
    pub fn track_effectiveness(&mut self, pattern_id: Uuid, used: bool, successful: bool) {
        if used {
            // Update confidence based on success
            let current_confidence = self
                .confidence_cache
                .get(&pattern_id)
                .copied()
                .unwrap_or(0.5);

            // Simple moving average update
            let new_confidence = if successful {
                (current_confidence * 0.9) + (1.0 * 0.1)
            } else {
                (current_confidence * 0.9) + (0.0 * 0.1)
            };

            self.confidence_cache.insert(pattern_id, new_confidence);

            debug!(
                pattern_id = %pattern_id,
                used = used,
                successful = successful,
                new_confidence = new_confidence,
                "Tracked pattern effectiveness"
            );
        }
    }

    /// Get the tracked confidence for a pattern
    #[must_use]
    pub fn get_confidence(&self, pattern_id: Uuid) -> Option<f32> {
        self.confidence_cache.get(&pattern_id).copied()
    }

    /// Get validation configuration
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}
