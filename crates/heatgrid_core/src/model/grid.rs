//! Dense calendar grid rendered by heatmap views.
//!
//! # Responsibility
//! - Define the read-only cell/column/grid shapes produced by the builder.
//! - Expose traversal helpers for renderers.
//!
//! # Invariants
//! - A grid always has exactly [`GRID_WEEKS`] columns of [`DAYS_PER_WEEK`]
//!   cells.
//! - Columns are Sunday-first and ordered oldest first.
//! - Cells are never mutated after construction; a new build replaces the
//!   whole grid.

use crate::grid::level::ContributionLevel;
use chrono::NaiveDate;
use serde::Serialize;

/// Number of week columns in a grid.
pub const GRID_WEEKS: usize = 53;
/// Number of day cells in one week column.
pub const DAYS_PER_WEEK: usize = 7;
/// Total cell count of a grid.
pub const GRID_CELLS: usize = GRID_WEEKS * DAYS_PER_WEEK;

/// One calendar day in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    /// Serialized as ISO `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u32,
    /// Locale-formatted date used by tooltips.
    pub display_date: String,
}

impl DayCell {
    /// Color bucket for this cell's count.
    pub fn level(&self) -> ContributionLevel {
        ContributionLevel::from_count(self.count)
    }
}

/// Seven consecutive days starting on a Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekColumn {
    days: [DayCell; DAYS_PER_WEEK],
}

impl WeekColumn {
    pub(crate) fn new(days: [DayCell; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DayCell; DAYS_PER_WEEK] {
        &self.days
    }

    /// The Sunday this column starts on.
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn total(&self) -> u64 {
        self.days.iter().map(|cell| u64::from(cell.count)).sum()
    }
}

/// Full 53-week contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    start: NaiveDate,
    end: NaiveDate,
    weeks: Vec<WeekColumn>,
}

impl Grid {
    /// Assembles a grid from builder output.
    ///
    /// Callers must pass exactly [`GRID_WEEKS`] columns in date order.
    pub(crate) fn from_weeks(weeks: Vec<WeekColumn>) -> Self {
        debug_assert_eq!(weeks.len(), GRID_WEEKS);
        let start = weeks[0].days[0].date;
        let end = weeks[weeks.len() - 1].days[DAYS_PER_WEEK - 1].date;
        Self { start, end, weeks }
    }

    /// First (oldest) date in the grid; always a Sunday.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the grid; always a Saturday.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn weeks(&self) -> &[WeekColumn] {
        &self.weeks
    }

    /// Iterates every cell in chronological order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Looks up the cell for `date`, if it falls inside the grid.
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        if date < self.start || date > self.end {
            return None;
        }
        let offset = usize::try_from((date - self.start).num_days()).ok()?;
        self.weeks
            .get(offset / DAYS_PER_WEEK)
            .map(|week| &week.days[offset % DAYS_PER_WEEK])
    }

    /// Whether `date` lies in `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Sum of all cell counts.
    pub fn total(&self) -> u64 {
        self.weeks.iter().map(WeekColumn::total).sum()
    }

    /// Highest single-day count, `0` for an empty grid.
    pub fn max_count(&self) -> u32 {
        self.cells().map(|cell| cell.count).max().unwrap_or(0)
    }

    /// Earliest cell holding the highest count, `None` when all are zero.
    pub fn busiest_day(&self) -> Option<&DayCell> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        self.cells().find(|cell| cell.count == max)
    }

    /// Number of days with at least one contribution.
    pub fn active_days(&self) -> usize {
        self.cells().filter(|cell| cell.count > 0).count()
    }
}
