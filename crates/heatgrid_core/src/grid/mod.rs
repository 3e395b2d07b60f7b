//! Grid construction: window math, bucketing, and fallback data.
//!
//! # Responsibility
//! - Build the dense calendar grid from counts.
//! - Map counts to color buckets.
//! - Produce placeholder counts when no real data is available.

pub mod builder;
pub mod fallback;
pub mod level;
