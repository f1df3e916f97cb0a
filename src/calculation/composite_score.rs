//! Composite performance score calculation.
//!
//! The four 0-100 sub-ratings are combined with configurable weights and
//! mapped onto the 0-5 scale used by the compensation review.

use rust_decimal::Decimal;

use crate::config::{ScoreAuthority, ScoreWeights, ScoringSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Divisor mapping a weighted 0-100 rating onto the 0-5 scale.
pub fn score_scale_divisor() -> Decimal {
    Decimal::new(20, 0)
}

/// Highest possible composite score.
pub fn max_composite_score() -> Decimal {
    Decimal::new(5, 0)
}

/// Computes the composite score of an employee.
///
/// The score is `(manager × w_m + peer × w_p + client × w_c + self × w_s) / 20`
/// rounded to 2 decimal places with banker's rounding.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] naming the first sub-rating that
/// is missing or outside `[0, 100]`.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::compute_composite_score;
/// use compensation_engine::config::ScoreWeights;
/// use compensation_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee: Employee = serde_json::from_str(r#"{
///     "id": "E-001", "department": "Sales", "position": "Rep",
///     "level": "L1", "region": "North",
///     "tenure_years": "3", "current_salary": "30000",
///     "manager_eval": "80", "peer_eval": "80",
///     "client_eval": "80", "self_eval": "80"
/// }"#).unwrap();
///
/// let score = compute_composite_score(&employee, &ScoreWeights::default()).unwrap();
/// assert_eq!(score, Decimal::new(4, 0));
/// ```
pub fn compute_composite_score(employee: &Employee, weights: &ScoreWeights) -> EngineResult<Decimal> {
    let manager = rating(employee, "manager_eval", employee.manager_eval)?;
    let peer = rating(employee, "peer_eval", employee.peer_eval)?;
    let client = rating(employee, "client_eval", employee.client_eval)?;
    let self_eval = rating(employee, "self_eval", employee.self_eval)?;

    let weighted = manager * weights.manager
        + peer * weights.peer
        + client * weights.client
        + self_eval * weights.self_eval;

    Ok((weighted / score_scale_divisor()).round_dp(2))
}

/// Scores an employee according to the configured [`ScoreAuthority`] and
/// returns the score that is authoritative for the rest of the pipeline.
///
/// - `computed`: the fresh score is stored in `computed_score`; a supplied
///   `composite_score` is left untouched.
/// - `supplied`: a supplied `composite_score` is returned as-is and nothing is
///   computed; without one, behaves like `computed`.
/// - `overwrite`: the fresh score is stored in both fields.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] if a needed sub-rating is missing
/// or out of range, or if a supplied score is outside `[0, 5]`.
pub fn apply_composite_score(
    employee: &mut Employee,
    scoring: &ScoringSettings,
) -> EngineResult<Decimal> {
    if scoring.authority == ScoreAuthority::Supplied {
        if let Some(supplied) = employee.composite_score {
            if supplied < Decimal::ZERO || supplied > max_composite_score() {
                return Err(EngineError::invalid_employee(
                    &employee.id,
                    "composite_score",
                    format!("supplied score {} is outside 0-5", supplied),
                ));
            }
            return Ok(supplied);
        }
    }

    let score = compute_composite_score(employee, &scoring.weights)?;
    employee.computed_score = Some(score);
    if scoring.authority == ScoreAuthority::Overwrite {
        employee.composite_score = Some(score);
    }

    Ok(score)
}

fn rating(employee: &Employee, field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    match value {
        None => Err(EngineError::invalid_employee(
            &employee.id,
            field,
            "rating is missing",
        )),
        Some(value) if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED => {
            Err(EngineError::invalid_employee(
                &employee.id,
                field,
                format!("rating {} is outside 0-100", value),
            ))
        }
        Some(value) => Ok(value),
    }
}
