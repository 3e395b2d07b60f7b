//! Per-day contribution counts.
//!
//! # Invariants
//! - Keys are unique calendar dates.
//! - Counts only grow through [`ContributionMap::record`]; they never go
//!   below zero.

use crate::model::event::EventRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sparse date → count mapping.
///
/// Serializes as a JSON object keyed by ISO `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContributionMap {
    counts: BTreeMap<NaiveDate, u32>,
}

impl ContributionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts allow-listed events by their UTC date.
    ///
    /// Records outside the allow-list are ignored.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut map = Self::new();
        for event in events {
            if event.is_contribution() {
                map.record(event.utc_date());
            }
        }
        map
    }

    /// Increments the bucket for `date` by one.
    pub fn record(&mut self, date: NaiveDate) {
        let slot = self.counts.entry(date).or_insert(0);
        *slot = slot.saturating_add(1);
    }

    /// Replaces the count for `date`.
    pub fn set(&mut self, date: NaiveDate, count: u32) {
        self.counts.insert(date, count);
    }

    /// Count for `date`, `0` when absent.
    pub fn get(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|count| u64::from(*count)).sum()
    }

    /// Iterates `(date, count)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(date, count)| (*date, *count))
    }
}

impl FromIterator<(NaiveDate, u32)> for ContributionMap {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, u32)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
