//! # MCP Tools
//!
//! Individual MCP tool implementations.

pub mod advanced_pattern_analysis;
pub mod embeddings;
pub mod episode_tags;
pub mod pattern_search;
pub mod quality_metrics;
