// ABOUTME: Library entry point for the vital-insight health scoring and memory engine
// ABOUTME: Pure analysis core plus an async cache-first persistence boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

#![deny(unsafe_code)]

//! # Vital Insight
//!
//! Turns a noisy, gap-filled stream of per-day physiological metrics into a
//! composite 0-100 score with a discrete tier, and maintains a bounded,
//! evolving per-subject memory of longitudinal patterns used to personalize
//! narrative output.
//!
//! ## Architecture
//!
//! - **[`intelligence`]**: pure, synchronous analysis — series cleaning and
//!   baselines, the weighted composite score and tier mapping, narrative
//!   compression, and memory derivation
//! - **[`store`]**: the only asynchronous boundary — a synchronous local
//!   cache slot plus a best-effort durable document store behind traits
//! - **[`engine`]**: the facade wiring metric series and completed analyses
//!   through scoring, derivation, and persistence
//!
//! Data acquisition, narrative generation, and presentation are external
//! collaborators; this engine consumes and produces their boundary types
//! only.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vital_insight::engine::InsightEngine;
//! use vital_insight::store::{LocalMemoryCache, MemoryStore};
//!
//! // Unauthenticated subjects run cache-only: no remote store attached.
//! let store = MemoryStore::new(Arc::new(LocalMemoryCache::new()), None);
//! let engine = InsightEngine::new(store);
//! let score = InsightEngine::daily_score(&[]);
//! assert!(score.score.is_none());
//! # let _ = engine;
//! ```

/// Operational constants: schema version, memory bounds, windows, timing
pub mod constants;

/// Facade wiring scoring and memory derivation to the store
pub mod engine;

/// Unified error handling
pub mod errors;

/// Pure analysis algorithms
pub mod intelligence;

/// Core data model
pub mod models;

/// Memory persistence boundary
pub mod store;
