//! Error types for relationship operations.
//!
//! This module defines specific error types for relationship management,
//! providing detailed context for failures during relationship operations.

use std::fmt;
use uuid::Uuid;

use crate::episode::RelationshipType;

/// Errors that can occur during relationship operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipError {
    /// Attempted to create a self-referencing relationship.
    SelfReference {
        /// The episode ID that was used for both source and target.
        episode_id: Uuid,
    },
    /// Attempted to create a duplicate relationship.
    Duplicate {
        /// Source episode ID.
        from: Uuid,
        /// Target episode ID.
        to: Uuid,
        /// Relationship type.
        rel_type: RelationshipType,
    },
    /// A cycle was detected in the relationship graph.
    CycleDetected {
        /// Path of episode IDs forming the cycle.
        path: Vec<Uuid>,
    },
    /// The requested relationship was not found.
    NotFound {
        /// The relationship ID that was not found.
        relationship_id: Uuid,
    },
    /// Invalid relationship type was specified.
    InvalidType {
        /// The invalid type name that was provided.
        type_name: String,
    },
    /// General validation failure.
    ValidationFailed {
        /// The reason for validation failure.
        reason: String,
    },
}

impl fmt::Display for RelationshipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfReference { episode_id } => {
                write!(
                    f,
                    "Cannot create self-referencing relationship for episode {episode_id}"
                )
            }
            Self::Duplicate { from, to, rel_type } => {
                write!(
                    f,
                    "Duplicate relationship: {from} -> {to} (type: {rel_type})"
                )
            }
            Self::CycleDetected { path } => {
                write!(f, "Cycle detected in relationship graph: ")?;
                for (i, id) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
            Self::NotFound { relationship_id } => {
                write!(f, "Relationship not found: {relationship_id}")
            }
            Self::InvalidType { type_name } => {
                write!(f, "Invalid relationship type: {type_name}")
            }
            Self::ValidationFailed { reason } => {
                write!(f, "Relationship validation failed: {reason}")
            }
        }
    }
}

impl std::error::Error for RelationshipError {}
