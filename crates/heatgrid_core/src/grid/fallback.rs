//! Placeholder counts shown when the activity feed is unavailable.
//!
//! # Invariants
//! - Covers the 365 days ending on `today`; days before `NaiveDate::MIN`
//!   are left out instead of panicking.
//! - Every count is drawn independently from `[0, SYNTHETIC_MAX_EXCLUSIVE)`.

use crate::grid::builder::WINDOW_DAYS;
use crate::model::contribution::ContributionMap;
use chrono::{Days, NaiveDate};
use rand::Rng;

/// Exclusive upper bound of a synthetic day's count.
pub const SYNTHETIC_MAX_EXCLUSIVE: u32 = 5;

/// Builds a synthetic map using the supplied RNG.
pub fn synthetic_map<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> ContributionMap {
    (0..WINDOW_DAYS)
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| (date, rng.random_range(0..SYNTHETIC_MAX_EXCLUSIVE)))
        .collect()
}
