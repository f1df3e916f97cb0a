//! Salary band policy model.
//!
//! A band is the reference row that scopes salary bounds and raise policy to
//! a (department, position, level, region) key and a tenure interval.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// A salary band and its raise policy.
///
/// Salary and policy bounds are optional so that a blank cell in the
/// reference sheet is representable; prompt construction rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandPolicy {
    /// Department key.
    #[serde(alias = "Department")]
    pub department: String,
    /// Position key.
    #[serde(alias = "Position")]
    pub position: String,
    /// Level key.
    #[serde(alias = "Level")]
    pub level: String,
    /// Region key.
    #[serde(alias = "Region")]
    pub region: String,
    /// Lowest tenure (years) covered, inclusive.
    #[serde(alias = "TenureMin")]
    pub tenure_min: Decimal,
    /// Highest tenure (years) covered, inclusive.
    #[serde(alias = "TenureMax")]
    pub tenure_max: Decimal,
    /// Bottom of the salary range.
    #[serde(default, alias = "SalaryRangeMin")]
    pub salary_range_min: Option<Decimal>,
    /// Top of the salary range.
    #[serde(default, alias = "SalaryRangeMax")]
    pub salary_range_max: Option<Decimal>,
    /// Smallest raise allowed by policy, in percent.
    #[serde(default, alias = "RaisePolicyMin")]
    pub raise_policy_min: Option<Decimal>,
    /// Largest raise allowed by policy, in percent.
    #[serde(default, alias = "RaisePolicyMax")]
    pub raise_policy_max: Option<Decimal>,
}

impl BandPolicy {
    /// Returns true if all four categorical keys equal the employee's.
    ///
    /// Comparison is exact and case-sensitive.
    pub fn matches_keys(&self, employee: &Employee) -> bool {
        self.department == employee.department
            && self.position == employee.position
            && self.level == employee.level
            && self.region == employee.region
    }

    /// Returns true if `tenure` lies within `[tenure_min, tenure_max]`.
    pub fn covers_tenure(&self, tenure: Decimal) -> bool {
        tenure >= self.tenure_min && tenure <= self.tenure_max
    }

    /// Short human-readable label, used in logs and warnings.
    pub fn label(&self) -> String {
        format!(
            "{}/{}/{}/{} [{}-{}y]",
            self.department,
            self.position,
            self.level,
            self.region,
            self.tenure_min.normalize(),
            self.tenure_max.normalize()
        )
    }
}
