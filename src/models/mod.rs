//! Core data models for the Compensation Recommendation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod band_policy;
mod batch_result;
mod employee;
mod recommendation;

pub use band_policy::BandPolicy;
pub use batch_result::{
    AuditWarning, BatchReport, BatchSummary, RecommendationRow, RecommendationSheets,
    SkipReason, SkippedEmployee,
};
pub use employee::Employee;
pub use recommendation::{
    Decision, DeliveryMode, FallbackReason, Provenance, Recommendation, RecommendationOutcome,
    TrainingCourse,
};
