//! Compensation and training recommendation engine.
//!
//! This crate scores employees from their 360-degree evaluations, matches
//! them to a salary band policy, and asks a text-generation backend for a
//! structured raise or training recommendation. Unusable backend output is
//! surfaced as an explicit fallback rather than a silent NO_RAISE.

#![warn(missing_docs)]

pub mod api;
pub mod backend;
pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod recommendation;
