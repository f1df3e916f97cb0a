//! Backend response parsing.
//!
//! The backend is asked for a strict JSON document but is not trusted to
//! produce one. Responses go through three steps: normalisation (trim and
//! strip a Markdown code fence), strict decoding, then invariant validation.
//! Anything that fails becomes a fallback outcome carrying the raw text.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::DecodeError;
use crate::models::{Decision, FallbackReason, Recommendation, RecommendationOutcome};

/// Fewest courses a NO_RAISE training plan may contain.
pub const MIN_TRAINING_COURSES: usize = 3;

/// Most courses a NO_RAISE training plan may contain.
pub const MAX_TRAINING_COURSES: usize = 5;

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
///
/// # Examples
///
/// ```
/// use compensation_engine::recommendation::strip_json_fences;
///
/// assert_eq!(strip_json_fences("```json\n{}\n```"), "{}");
/// assert_eq!(strip_json_fences("  {} "), "{}");
/// ```
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Decodes and validates a backend response.
///
/// Unknown extra keys are ignored; missing required keys and wrong types are
/// decode errors.
pub fn parse_recommendation(raw: &str) -> Result<Recommendation, DecodeError> {
    let recommendation: Recommendation = serde_json::from_str(strip_json_fences(raw))?;
    validate_recommendation(recommendation)
}

/// Checks the decision invariants, normalising an empty RAISE training plan
/// to `None`.
pub fn validate_recommendation(
    mut recommendation: Recommendation,
) -> Result<Recommendation, DecodeError> {
    if recommendation.justification.trim().is_empty() {
        return Err(DecodeError::Invalid("justification is empty".to_string()));
    }

    match recommendation.decision {
        Decision::Raise => {
            require_positive("raise_percentage", recommendation.raise_percentage)?;
            require_positive("new_salary", recommendation.new_salary)?;
            if let Some(percentage) = recommendation.raise_percentage {
                if percentage > Decimal::ONE_HUNDRED {
                    return Err(DecodeError::Invalid(format!(
                        "raise_percentage {} exceeds 100",
                        percentage.normalize()
                    )));
                }
            }

            if recommendation
                .training_plan
                .as_ref()
                .is_some_and(|plan| plan.is_empty())
            {
                recommendation.training_plan = None;
            }
            if recommendation.training_plan.is_some() {
                return Err(DecodeError::Invalid(
                    "RAISE must not carry a training plan".to_string(),
                ));
            }
        }
        Decision::NoRaise => {
            if recommendation.raise_percentage.is_some() || recommendation.new_salary.is_some() {
                return Err(DecodeError::Invalid(
                    "NO_RAISE must not carry raise_percentage or new_salary".to_string(),
                ));
            }

            let plan = recommendation.training_plan.as_deref().unwrap_or_default();
            if !(MIN_TRAINING_COURSES..=MAX_TRAINING_COURSES).contains(&plan.len()) {
                return Err(DecodeError::Invalid(format!(
                    "NO_RAISE requires {} to {} training courses, got {}",
                    MIN_TRAINING_COURSES,
                    MAX_TRAINING_COURSES,
                    plan.len()
                )));
            }

            for (index, course) in plan.iter().enumerate() {
                if course.name.trim().is_empty() {
                    return Err(DecodeError::Invalid(format!(
                        "training course #{} has no name",
                        index + 1
                    )));
                }
                if course.competency.trim().is_empty() {
                    return Err(DecodeError::Invalid(format!(
                        "training course #{} has no competency",
                        index + 1
                    )));
                }
                if course.hours <= Decimal::ZERO {
                    return Err(DecodeError::Invalid(format!(
                        "training course #{} has non-positive hours",
                        index + 1
                    )));
                }
            }
        }
    }

    Ok(recommendation)
}

/// Turns raw backend text into an outcome. Never fails: unusable text
/// becomes a [`RecommendationOutcome::Fallback`] whose justification is the
/// raw text, unchanged.
pub fn interpret_response(raw: &str) -> RecommendationOutcome {
    match parse_recommendation(raw) {
        Ok(recommendation) => RecommendationOutcome::Parsed(recommendation),
        Err(error) => {
            let reason = match error {
                DecodeError::Malformed(e) => FallbackReason::Undecodable(e.to_string()),
                DecodeError::Invalid(message) => FallbackReason::InvalidRecord(message),
            };
            warn!(reason = %reason, "Backend response unusable, using fallback recommendation");
            RecommendationOutcome::fallback(raw, reason)
        }
    }
}

fn require_positive(field: &str, value: Option<Decimal>) -> Result<(), DecodeError> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(()),
        Some(_) => Err(DecodeError::Invalid(format!("{} must be positive", field))),
        None => Err(DecodeError::Invalid(format!("RAISE requires {}", field))),
    }
}
