//! Pattern command submodules

pub mod analyze;
#[cfg(feature = "turso")]
pub mod batch;
pub mod decay;
pub mod effectiveness;
pub mod list;
pub mod output;
pub mod search;
pub mod types;
pub mod view;

pub use analyze::analyze_pattern;
#[cfg(feature = "turso")]
pub use batch::execute_pattern_batch_command;
pub use decay::decay_patterns;
pub use effectiveness::pattern_effectiveness;
pub use list::list_patterns;
pub use search::{recommend_patterns, search_patterns};
pub use types::*;
pub use view::view_pattern;
