//! Configuration types for memory-cli
//!
//! This module defines the core configuration structures used throughout
//! the memory-cli application, providing a clean separation of concerns
//! from loading, validation, and storage initialization logic.

// Submodules
mod defaults;
mod defaults_impl;
mod detection;
mod enums;
mod presets;
mod simple;
pub mod system_info;
mod structs;

// Re-exports for backward compatibility
pub use defaults::*;
pub use enums::{ConfigError, DatabaseType, PerformanceLevel};
pub use presets::ConfigPreset;
pub use structs::{CliConfig, Config, DatabaseConfig, EmbeddingsConfig, StorageConfig};
pub use system_info::{smart_config, ConfigRecommendations, SystemInfo};

// Re-export validation types from validator module for backward compatibility
pub use crate::config::validator::{ValidationError, ValidationResult, ValidationWarning};
