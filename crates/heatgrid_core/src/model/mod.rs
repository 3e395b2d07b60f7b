//! Domain model for contribution heatmaps.
//!
//! # Responsibility
//! - Define feed records, per-day counts, and the rendered grid shape.
//! - Keep derived data (cells, columns) read-only once built.
//!
//! # Invariants
//! - Only allow-listed event kinds contribute to counts.
//! - Grid shape is fixed at 53 × 7 cells.

pub mod contribution;
pub mod event;
pub mod grid;
