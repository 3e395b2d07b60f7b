//! Core logic for heatgrid contribution heatmaps.
//! This crate owns every grid invariant; front ends only render its output.

pub mod config;
pub mod feed;
pub mod grid;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;

pub use config::{ConfigError, ConfigResult, HeatgridConfig};
pub use feed::{ConfiguredFeed, EventFeed, FeedError, FeedResult, FileEventFeed, GithubEventFeed};
pub use grid::builder::{build_grid, build_grid_from_map, clamp_anchor, grid_start};
pub use grid::fallback::synthetic_map;
pub use grid::level::ContributionLevel;
pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::contribution::ContributionMap;
pub use model::event::{decode_events, DecodedEvents, EventKind, EventRecord};
pub use model::grid::{DayCell, Grid, WeekColumn, DAYS_PER_WEEK, GRID_CELLS, GRID_WEEKS};
pub use render::label::{tooltip_label, DisplayLocale};
pub use render::text::{render_text, TextOptions};
pub use service::heatmap_service::{FallbackPolicy, GridSource, HeatmapOutcome, HeatmapService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
