//! Base reward calculation based on task outcome

use crate::episode::Episode;
use crate::types::TaskOutcome;

/// Calculate base reward from episode outcome
///
/// Returns:
/// - 1.0 for complete success
/// - Proportional value (0.0-1.0) for partial success
/// - 0.0 for failure or incomplete episodes
pub fn calculate_base_reward(episode: &Episode) -> f32 {
    match &episode.outcome {
        Some(TaskOutcome::Success { .. }) => 1.0,
        Some(TaskOutcome::PartialSuccess {
            completed, failed, ..
        }) => {
            // Proportional reward based on completion ratio
            let total = completed.len() + failed.len();
            if total == 0 {
                0.5 // Default for partial success with no specifics
            } else {
                completed.len() as f32 / total as f32
            }
        }
        Some(TaskOutcome::Failure { .. }) => 0.0,
        None => 0.0, // Not completed
    }
}
