//! Error types for episode relationship operations.
//!
//! This module defines error types for validation failures, removal failures,
//! and graph algorithm errors in the relationship management system.

use std::fmt;
use uuid::Uuid;

use super::RelationshipType;

/// Errors that can occur during relationship validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Attempted to create a self-relationship (episode relating to itself).
    SelfRelationship {
        /// The episode ID that was used for both source and target.
        episode_id: Uuid,
    },
    /// Attempted to create a duplicate relationship.
    DuplicateRelationship {
        /// Source episode ID.
        from: Uuid,
        /// Target episode ID.
        to: Uuid,
        /// Relationship type.
        rel_type: RelationshipType,
    },
    /// A cycle was detected in the relationship graph.
    CycleDetected {
        /// Source episode ID that would create the cycle.
        from: Uuid,
        /// Target episode ID that would create the cycle.
        to: Uuid,
        /// Path of episode IDs forming the cycle.
        cycle_path: Vec<Uuid>,
    },
    /// Invalid priority value provided.
    InvalidPriority {
        /// The priority value that was provided.
        priority: u8,
        /// The valid range for priority values.
        valid_range: (u8, u8),
    },
    /// Referenced episode was not found.
    EpisodeNotFound {
        /// The episode ID that was not found.
        episode_id: Uuid,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfRelationship { episode_id } => {
                write!(f, "Self-relationship not allowed for episode {episode_id}")
            }
            Self::DuplicateRelationship { from, to, rel_type } => {
                write!(f, "Duplicate relationship: {from} -> {to} ({rel_type:?})")
            }
            Self::CycleDetected {
                from,
                to,
                cycle_path,
            } => {
                write!(
                    f,
                    "Cycle detected: {from} -> {to}, cycle path: {cycle_path:?}"
                )
            }
            Self::InvalidPriority {
                priority,
                valid_range,
            } => {
                write!(
                    f,
                    "Invalid priority {priority}, must be in range {valid_range:?}"
                )
            }
            Self::EpisodeNotFound { episode_id } => {
                write!(f, "Episode not found: {episode_id}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur during relationship removal.
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalError {
    /// The relationship to remove was not found.
    NotFound {
        /// The relationship ID that was not found.
        id: Uuid,
    },
}

impl fmt::Display for RemovalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Relationship not found: {id}"),
        }
    }
}

impl std::error::Error for RemovalError {}

/// Errors that can occur during graph algorithm operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An error occurred during graph traversal.
    TraversalError {
        /// Description of the error.
        message: String,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TraversalError { message } => write!(f, "Graph traversal error: {message}"),
        }
    }
}

impl std::error::Error for GraphError {}
