//! Presentation helpers over a built grid.
//!
//! Renderers are pure functions of a [`crate::Grid`]; none of them mutate
//! it or reach back into the feed.

pub mod label;
pub mod text;
