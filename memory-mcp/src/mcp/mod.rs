//! # MCP Tools Module
//!
//! This module contains MCP tool implementations for advanced functionality.

pub mod tools;

pub use tools::advanced_pattern_analysis::{
    AdvancedPatternAnalysisInput, AdvancedPatternAnalysisTool, AnalysisType,
};
