//! Deterministic calculation steps of the recommendation pipeline.
//!
//! This module contains the composite performance score calculation and
//! the salary band lookup. Both are pure functions of their inputs and run
//! before any call to the text-generation backend.

mod band_match;
mod composite_score;

pub use band_match::{BandMatch, match_band};
pub use composite_score::{
    apply_composite_score, compute_composite_score, max_composite_score, score_scale_divisor,
};
