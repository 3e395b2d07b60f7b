//! Heatmap use-case service.
//!
//! # Responsibility
//! - Pull one batch from the configured feed and build the grid.
//! - Apply the fallback policy when the feed fails.
//!
//! # Invariants
//! - `build` never returns an error; the rendering layer always gets a
//!   well-formed grid.
//! - The outcome records whether the grid shows real or placeholder data.

use crate::feed::EventFeed;
use crate::grid::builder::{build_grid, build_grid_from_map};
use crate::grid::fallback::synthetic_map;
use crate::model::contribution::ContributionMap;
use crate::model::grid::Grid;
use crate::render::label::DisplayLocale;
use chrono::NaiveDate;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// What to show when the feed cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Random placeholder counts in `[0, 5)` per day.
    #[default]
    Synthetic,
    /// An all-zero grid.
    Empty,
}

impl FallbackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Empty => "empty",
        }
    }
}

impl Display for FallbackPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "empty" => Ok(Self::Empty),
            other => Err(format!(
                "unsupported fallback policy `{other}`; expected synthetic|empty"
            )),
        }
    }
}

/// Provenance of the data a grid was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridSource {
    /// Built from feed records.
    Feed {
        feed: String,
        records: usize,
        skipped: usize,
    },
    /// Feed failed; grid holds synthetic placeholder counts.
    Synthetic { reason: String },
    /// Feed failed; grid is all zeros.
    Empty { reason: String },
}

impl GridSource {
    /// Whether the grid reflects real activity.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Feed { .. })
    }
}

/// Result of one service build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapOutcome {
    pub source: GridSource,
    pub grid: Grid,
}

/// Use-case service wrapping a feed and render settings.
pub struct HeatmapService<F: EventFeed> {
    feed: F,
    locale: DisplayLocale,
    fallback: FallbackPolicy,
}

impl<F: EventFeed> HeatmapService<F> {
    pub fn new(feed: F, locale: DisplayLocale, fallback: FallbackPolicy) -> Self {
        Self {
            feed,
            locale,
            fallback,
        }
    }

    /// Fetches events and builds the grid anchored on `today`.
    pub async fn build(&self, today: NaiveDate) -> HeatmapOutcome {
        self.build_with_rng(today, &mut rand::rng()).await
    }

    /// Same as [`Self::build`] with a caller-supplied RNG for the synthetic
    /// fallback.
    pub async fn build_with_rng<R: Rng + ?Sized>(
        &self,
        today: NaiveDate,
        rng: &mut R,
    ) -> HeatmapOutcome {
        let feed_name = self.feed.source_name();
        match self.feed.fetch_events().await {
            Ok(decoded) => {
                let grid = build_grid(&decoded.records, today, self.locale);
                info!(
                    "event=heatmap_build module=service status=ok source={} records={} skipped={} total={}",
                    feed_name,
                    decoded.records.len(),
                    decoded.skipped,
                    grid.total()
                );
                HeatmapOutcome {
                    source: GridSource::Feed {
                        feed: feed_name.to_string(),
                        records: decoded.records.len(),
                        skipped: decoded.skipped,
                    },
                    grid,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(
                    "event=heatmap_build module=service status=fallback source={} policy={} reason={}",
                    feed_name, self.fallback, reason
                );
                match self.fallback {
                    FallbackPolicy::Synthetic => HeatmapOutcome {
                        grid: build_grid_from_map(&synthetic_map(today, rng), today, self.locale),
                        source: GridSource::Synthetic { reason },
                    },
                    FallbackPolicy::Empty => HeatmapOutcome {
                        grid: build_grid_from_map(&ContributionMap::new(), today, self.locale),
                        source: GridSource::Empty { reason },
                    },
                }
            }
        }
    }
}
