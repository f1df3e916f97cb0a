//! Recommendation prompt construction.
//!
//! A [`PromptContext`] is built from a scored employee and its matched band,
//! checking that every required value is present, and is then rendered into
//! [`RECOMMENDATION_PROMPT_TEMPLATE`].

use rust_decimal::Decimal;

use crate::config::ScoreAuthority;
use crate::error::{EngineError, EngineResult};
use crate::models::{BandPolicy, Employee};

/// Rendered in place of optional employee fields that are absent.
pub const NOT_PROVIDED: &str = "not provided";

/// Recommendation prompt template. Every `{placeholder}` names a
/// [`PromptContext`] field; braces that do not name one are left verbatim.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are an expert Human Resources assistant specialising in compensation, performance evaluation and corporate training.
You act as the recommendation engine for the HR department, producing objective, traceable decisions that can be justified from structured data.

STRICT RULES:
- Do not invent vendors, companies, prices or sensitive data.
- Do not mention commercial brands.
- Use professional, neutral language that can be justified to HR.
- If there is no salary raise, you must recommend a structured training plan of 3 to 5 generic courses.
- If there is a salary raise, do NOT recommend training unless strictly necessary. Any such note belongs in the justification; "training_plan" must be null.
- Always base the decision on the composite score, the position within the salary band and the market benchmark.
- Any raise percentage must lie within the raise policy range below.

EMPLOYEE CONTEXT:
Department: {department}
Position: {position}
Level: {level}
Region: {region}
Tenure (years): {tenure_years}
Current salary: {current_salary}
Composite score (0-5): {composite_score}
Manager evaluation: {manager_eval}
Peer evaluation: {peer_eval}
Client evaluation: {client_eval}
Self evaluation: {self_eval}
Strong competencies: {strong_competencies}
Weak competencies: {weak_competencies}
Market benchmark (% vs market): {market_benchmark}

SALARY CONTEXT:
Salary range minimum: {salary_range_min}
Salary range maximum: {salary_range_max}
Raise policy minimum (%): {raise_policy_min}
Raise policy maximum (%): {raise_policy_max}

TASK:
Decide whether the employee should receive a salary raise.

If a raise is warranted:
- State the recommended percentage.
- Calculate the new salary.
- Justify the decision in 5 to 7 lines.

If no raise is warranted:
- Briefly explain why.
- Design a training plan of 3 to 5 generic courses.
  For each course include:
  - Course name
  - Competency to develop
  - Duration in hours
  - Delivery mode (online / in_person / blended)
  - Justification

OUTPUT FORMAT (STRICT JSON, no text outside the object):
{
  "decision": "RAISE" | "NO_RAISE",
  "raise_percentage": number | null,
  "new_salary": number | null,
  "justification": "string",
  "training_plan": [
    {
      "name": "string",
      "competency": "string",
      "hours": number,
      "delivery_mode": "online" | "in_person" | "blended",
      "justification": "string"
    }
  ] | null
}
"#;

/// Values substituted into the prompt template, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    /// Employee department.
    pub department: String,
    /// Employee position.
    pub position: String,
    /// Employee level.
    pub level: String,
    /// Employee region.
    pub region: String,
    /// Tenure in years.
    pub tenure_years: String,
    /// Current salary.
    pub current_salary: String,
    /// Authoritative composite score.
    pub composite_score: String,
    /// Manager evaluation.
    pub manager_eval: String,
    /// Peer evaluation.
    pub peer_eval: String,
    /// Client evaluation.
    pub client_eval: String,
    /// Self evaluation.
    pub self_eval: String,
    /// Strong competencies, or [`NOT_PROVIDED`].
    pub strong_competencies: String,
    /// Weak competencies, or [`NOT_PROVIDED`].
    pub weak_competencies: String,
    /// Market benchmark, or [`NOT_PROVIDED`].
    pub market_benchmark: String,
    /// Band salary minimum.
    pub salary_range_min: String,
    /// Band salary maximum.
    pub salary_range_max: String,
    /// Band raise policy minimum.
    pub raise_policy_min: String,
    /// Band raise policy maximum.
    pub raise_policy_max: String,
}

impl PromptContext {
    /// Builds the context for an employee and its matched band.
    ///
    /// The composite score used is the one `authority` treats as
    /// authoritative (see [`Employee::effective_score`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] if a categorical key is blank,
    /// a sub-rating is missing or the employee has no composite score, and
    /// [`EngineError::InvalidBand`] if a salary or policy bound is missing.
    pub fn new(
        employee: &Employee,
        band: &BandPolicy,
        authority: ScoreAuthority,
    ) -> EngineResult<Self> {
        let id = employee.id.as_str();

        Ok(Self {
            department: required_text(id, "department", &employee.department)?,
            position: required_text(id, "position", &employee.position)?,
            level: required_text(id, "level", &employee.level)?,
            region: required_text(id, "region", &employee.region)?,
            tenure_years: format_decimal(employee.tenure_years),
            current_salary: format_decimal(employee.current_salary),
            composite_score: required_employee_value(
                id,
                "composite_score",
                employee.effective_score(authority),
            )?,
            manager_eval: required_employee_value(id, "manager_eval", employee.manager_eval)?,
            peer_eval: required_employee_value(id, "peer_eval", employee.peer_eval)?,
            client_eval: required_employee_value(id, "client_eval", employee.client_eval)?,
            self_eval: required_employee_value(id, "self_eval", employee.self_eval)?,
            strong_competencies: optional_text(employee.strong_competencies.as_deref()),
            weak_competencies: optional_text(employee.weak_competencies.as_deref()),
            market_benchmark: employee
                .market_benchmark
                .map(format_decimal)
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            salary_range_min: required_band_value("salary_range_min", band.salary_range_min)?,
            salary_range_max: required_band_value("salary_range_max", band.salary_range_max)?,
            raise_policy_min: required_band_value("raise_policy_min", band.raise_policy_min)?,
            raise_policy_max: required_band_value("raise_policy_max", band.raise_policy_max)?,
        })
    }

    /// Returns the value for a template placeholder name.
    fn lookup(&self, name: &str) -> Option<&str> {
        let value = match name {
            "department" => &self.department,
            "position" => &self.position,
            "level" => &self.level,
            "region" => &self.region,
            "tenure_years" => &self.tenure_years,
            "current_salary" => &self.current_salary,
            "composite_score" => &self.composite_score,
            "manager_eval" => &self.manager_eval,
            "peer_eval" => &self.peer_eval,
            "client_eval" => &self.client_eval,
            "self_eval" => &self.self_eval,
            "strong_competencies" => &self.strong_competencies,
            "weak_competencies" => &self.weak_competencies,
            "market_benchmark" => &self.market_benchmark,
            "salary_range_min" => &self.salary_range_min,
            "salary_range_max" => &self.salary_range_max,
            "raise_policy_min" => &self.raise_policy_min,
            "raise_policy_max" => &self.raise_policy_max,
            _ => return None,
        };
        Some(value)
    }

    /// Renders the context into [`RECOMMENDATION_PROMPT_TEMPLATE`].
    pub fn render(&self) -> String {
        render_template(RECOMMENDATION_PROMPT_TEMPLATE, self)
    }
}

/// Substitutes `{name}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so free text containing braces
/// cannot inject further placeholders.
pub fn render_template(template: &str, context: &PromptContext) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            context
                .lookup(&after[..close])
                .map(|value| (value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Builds the recommendation prompt for an employee and its matched band.
pub fn build_prompt(
    employee: &Employee,
    band: &BandPolicy,
    authority: ScoreAuthority,
) -> EngineResult<String> {
    Ok(PromptContext::new(employee, band, authority)?.render())
}

fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn required_text(employee_id: &str, field: &str, value: &str) -> EngineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EngineError::invalid_employee(employee_id, field, "value is empty"));
    }
    Ok(value.to_string())
}

fn required_employee_value(
    employee_id: &str,
    field: &str,
    value: Option<Decimal>,
) -> EngineResult<String> {
    value
        .map(format_decimal)
        .ok_or_else(|| EngineError::invalid_employee(employee_id, field, "value is missing"))
}

fn required_band_value(field: &str, value: Option<Decimal>) -> EngineResult<String> {
    value
        .map(format_decimal)
        .ok_or_else(|| EngineError::invalid_band(field, "value is missing"))
}

fn optional_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_PROVIDED.to_string(),
    }
}
