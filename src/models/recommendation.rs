//! Recommendation models.
//!
//! [`Recommendation`] is the decision record decoded from the backend.
//! [`RecommendationOutcome`] wraps it with its provenance so that a genuine
//! NO_RAISE can never be confused with a response the engine failed to read.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The compensation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// A salary increase is granted.
    Raise,
    /// No increase; a training plan is issued instead.
    NoRaise,
}

impl Decision {
    /// Wire representation of the decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Raise => "RAISE",
            Decision::NoRaise => "NO_RAISE",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a training course is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Remote, self-paced or live online.
    #[serde(alias = "Online", alias = "ONLINE")]
    Online,
    /// Classroom.
    #[serde(alias = "in-person", alias = "In person", alias = "classroom")]
    InPerson,
    /// A mix of online and in-person sessions.
    #[serde(alias = "Blended", alias = "hybrid", alias = "mixed")]
    Blended,
}

/// A single course in a training plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCourse {
    /// Generic course name.
    pub name: String,
    /// Competency the course targets.
    pub competency: String,
    /// Duration in hours.
    pub hours: Decimal,
    /// Delivery mode.
    pub delivery_mode: DeliveryMode,
    /// Why this course was chosen.
    pub justification: String,
}

/// A compensation-or-training decision for one employee.
///
/// # Example
///
/// ```
/// use compensation_engine::models::{Decision, Recommendation};
///
/// let json = r#"{
///     "decision": "RAISE",
///     "raise_percentage": 4.5,
///     "new_salary": 31350,
///     "justification": "Consistently above target.",
///     "training_plan": null
/// }"#;
/// let recommendation: Recommendation = serde_json::from_str(json).unwrap();
/// assert_eq!(recommendation.decision, Decision::Raise);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The decision.
    pub decision: Decision,
    /// Raise in percent; set iff the decision is RAISE.
    #[serde(default)]
    pub raise_percentage: Option<Decimal>,
    /// Salary after the raise; set iff the decision is RAISE.
    #[serde(default)]
    pub new_salary: Option<Decimal>,
    /// Free-text justification.
    pub justification: String,
    /// Ordered training plan; set iff the decision is NO_RAISE.
    #[serde(default)]
    pub training_plan: Option<Vec<TrainingCourse>>,
}

impl Recommendation {
    /// Builds the degraded NO_RAISE record used when the backend response
    /// cannot be used. The raw text becomes the justification verbatim.
    pub fn fallback(raw_text: impl Into<String>) -> Self {
        Self {
            decision: Decision::NoRaise,
            raise_percentage: None,
            new_salary: None,
            justification: raw_text.into(),
            training_plan: None,
        }
    }
}

/// Where a recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Decoded and validated from the backend response.
    Model,
    /// Produced by the engine because the response was unusable.
    Fallback,
}

/// Why a fallback recommendation was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The response was not a decodable recommendation document.
    Undecodable(String),
    /// The response decoded but broke a recommendation invariant.
    InvalidRecord(String),
    /// The backend could not be reached.
    BackendUnavailable(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Undecodable(detail) => write!(f, "undecodable response: {}", detail),
            FallbackReason::InvalidRecord(detail) => write!(f, "invalid recommendation: {}", detail),
            FallbackReason::BackendUnavailable(detail) => {
                write!(f, "backend unavailable: {}", detail)
            }
        }
    }
}

/// The result of asking the engine for a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationOutcome {
    /// The backend produced a valid recommendation.
    Parsed(Recommendation),
    /// The engine substituted a degraded recommendation.
    Fallback {
        /// The degraded NO_RAISE record.
        recommendation: Recommendation,
        /// Why the substitution happened.
        reason: FallbackReason,
    },
}

impl RecommendationOutcome {
    /// Builds a fallback outcome from the raw backend text.
    pub fn fallback(raw_text: impl Into<String>, reason: FallbackReason) -> Self {
        RecommendationOutcome::Fallback {
            recommendation: Recommendation::fallback(raw_text),
            reason,
        }
    }

    /// Returns the recommendation regardless of provenance.
    pub fn recommendation(&self) -> &Recommendation {
        match self {
            RecommendationOutcome::Parsed(recommendation) => recommendation,
            RecommendationOutcome::Fallback { recommendation, .. } => recommendation,
        }
    }

    /// Returns the provenance of the recommendation.
    pub fn provenance(&self) -> Provenance {
        match self {
            RecommendationOutcome::Parsed(_) => Provenance::Model,
            RecommendationOutcome::Fallback { .. } => Provenance::Fallback,
        }
    }

    /// Returns true if this is a fallback outcome.
    pub fn is_fallback(&self) -> bool {
        self.provenance() == Provenance::Fallback
    }

    /// Splits the outcome into its recommendation, provenance and reason.
    pub fn into_parts(self) -> (Recommendation, Provenance, Option<FallbackReason>) {
        match self {
            RecommendationOutcome::Parsed(recommendation) => {
                (recommendation, Provenance::Model, None)
            }
            RecommendationOutcome::Fallback {
                recommendation,
                reason,
            } => (recommendation, Provenance::Fallback, Some(reason)),
        }
    }
}
