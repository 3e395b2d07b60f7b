//! Use-case service layer.
//!
//! # Responsibility
//! - Orchestrate feed → fallback → grid for callers.
//!
//! # Invariants
//! - Services stay feed-agnostic; the source is injected via `EventFeed`.

pub mod heatmap_service;
