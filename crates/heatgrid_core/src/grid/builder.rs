//! Contribution grid builder.
//!
//! # Responsibility
//! - Turn a sparse date → count map into the dense 53 × 7 calendar grid.
//! - Anchor the grid window on the caller-supplied `today`.
//!
//! # Invariants
//! - Output always has 371 cells, regardless of input.
//! - The first cell is the Sunday on or before `today - 364 days`.
//! - Building is pure: same inputs give an identical grid.
//! - Building never panics: anchors too close to the calendar limits are
//!   clamped to the nearest anchor whose whole grid is representable.

use crate::model::contribution::ContributionMap;
use crate::model::event::EventRecord;
use crate::model::grid::{DayCell, Grid, WeekColumn, DAYS_PER_WEEK, GRID_CELLS, GRID_WEEKS};
use crate::render::label::DisplayLocale;
use chrono::{Datelike, Days, NaiveDate};
use log::{debug, warn};

/// Days covered by the trailing window, `today` included.
pub const WINDOW_DAYS: u64 = 365;

/// Extra days before the window start a Sunday rollback can reach.
const MAX_ROLLBACK_DAYS: u64 = 6;

/// Returns the first date of the grid anchored on `today`.
///
/// `today - 364` rolled back to the nearest earlier-or-equal Sunday.
/// Returns `None` when any cell of that grid falls outside the range
/// `NaiveDate` can represent.
pub fn grid_start(today: NaiveDate) -> Option<NaiveDate> {
    let window_start = today.checked_sub_days(Days::new(WINDOW_DAYS - 1))?;
    let back = u64::from(window_start.weekday().num_days_from_sunday());
    let start = window_start.checked_sub_days(Days::new(back))?;
    start.checked_add_days(Days::new((GRID_CELLS - 1) as u64))?;
    Some(start)
}

/// Clamps `today` into the range of anchors accepted by [`grid_start`].
pub fn clamp_anchor(today: NaiveDate) -> NaiveDate {
    let earliest = NaiveDate::MIN
        .checked_add_days(Days::new(WINDOW_DAYS - 1 + MAX_ROLLBACK_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let latest = NaiveDate::MAX
        .checked_sub_days(Days::new(MAX_ROLLBACK_DAYS))
        .unwrap_or(NaiveDate::MAX);
    today.clamp(earliest, latest)
}

/// Builds a grid from raw feed records.
///
/// Records outside the contribution allow-list are ignored. Records dated
/// outside the grid window do not show up in any cell.
pub fn build_grid(events: &[EventRecord], today: NaiveDate, locale: DisplayLocale) -> Grid {
    let map = ContributionMap::from_events(events);
    debug!(
        "event=grid_count module=grid status=ok records={} contribution_days={}",
        events.len(),
        map.len()
    );
    build_grid_from_map(&map, today, locale)
}

/// Builds a grid from an already aggregated map.
pub fn build_grid_from_map(map: &ContributionMap, today: NaiveDate, locale: DisplayLocale) -> Grid {
    let anchor = clamp_anchor(today);
    if anchor != today {
        warn!(
            "event=grid_build module=grid status=clamped requested={} anchor={}",
            today, anchor
        );
    }
    let start = grid_start(anchor).unwrap_or(anchor);
    let mut weeks = Vec::with_capacity(GRID_WEEKS);

    for week in 0..GRID_WEEKS {
        let days = std::array::from_fn(|day| {
            let offset = (week * DAYS_PER_WEEK + day) as u64;
            let date = start
                .checked_add_days(Days::new(offset))
                .unwrap_or(NaiveDate::MAX);
            DayCell {
                date,
                count: map.get(date),
                display_date: locale.format_date(date),
            }
        });
        weeks.push(WeekColumn::new(days));
    }

    let grid = Grid::from_weeks(weeks);
    debug!(
        "event=grid_build module=grid status=ok start={} end={} total={}",
        grid.start(),
        grid.end(),
        grid.total()
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::{clamp_anchor, grid_start};
    use chrono::{Datelike, Days, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn start_is_sunday_within_a_week_of_window_start() {
        let mut today = date(2024, 1, 1);
        for _ in 0..14 {
            let start = grid_start(today).expect("ordinary anchor");
            assert_eq!(start.weekday(), Weekday::Sun);
            let lag = (today - start).num_days();
            assert!((364..=370).contains(&lag), "lag={lag} today={today}");
            today = today.succ_opt().expect("next day");
        }
    }

    #[test]
    fn start_for_known_anchor() {
        // 2024-06-15 - 364 days = 2023-06-17 (Saturday) -> Sunday 2023-06-11.
        assert_eq!(grid_start(date(2024, 6, 15)), Some(date(2023, 6, 11)));
        // 2024-06-16 - 364 days = 2023-06-18 (Sunday) stays put.
        assert_eq!(grid_start(date(2024, 6, 16)), Some(date(2023, 6, 18)));
    }

    #[test]
    fn calendar_limits_have_no_start_but_clamped_anchors_do() {
        assert_eq!(grid_start(NaiveDate::MIN), None);
        assert_eq!(grid_start(NaiveDate::MAX), None);

        for extreme in [NaiveDate::MIN, NaiveDate::MAX] {
            let anchor = clamp_anchor(extreme);
            assert!(grid_start(anchor).is_some(), "anchor={anchor}");
        }
    }

    #[test]
    fn clamp_leaves_ordinary_anchors_alone() {
        let today = date(2024, 6, 15);
        assert_eq!(clamp_anchor(today), today);
        let near_max = NaiveDate::MAX - Days::new(6);
        assert_eq!(clamp_anchor(near_max), near_max);
        assert!(grid_start(near_max).is_some());
    }
}
