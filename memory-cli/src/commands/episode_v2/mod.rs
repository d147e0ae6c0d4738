//! Episode command module
//!
//! This module provides commands for managing episodes in the memory system.
//! It is split into submodules to keep each file under 500 LOC.

pub mod episode;

pub use episode::AppliedFilters;
pub use episode::DeletionResult;
pub use episode::EpisodeCommands;
pub use episode::EpisodeDetail;
pub use episode::EpisodeList;
pub use episode::EpisodeListFiltered;
pub use episode::EpisodeSearchResult;
pub use episode::EpisodeSortOrder;
pub use episode::EpisodeStatus;
pub use episode::EpisodeStep;
pub use episode::EpisodeSummary;
pub use episode::FilterCommands;
pub use episode::FilterList;
pub use episode::SavedFilter;
pub use episode::TaskOutcome;

pub use episode::bulk_get_episodes;
pub use episode::complete_episode;
pub use episode::create_episode;
pub use episode::delete;
pub use episode::delete_episode;
pub use episode::filter;
pub use episode::handle_filter_command;
pub use episode::list_episodes;
pub use episode::log_step;
pub use episode::search_episodes;
pub use episode::view_episode;
