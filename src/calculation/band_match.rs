//! Salary band matching.
//!
//! A band applies to an employee when all four categorical keys are equal
//! (case-sensitive) and the employee's tenure lies within the band's
//! inclusive tenure range. When several bands apply, the first one in stored
//! order wins and the candidate count is reported alongside it.

use crate::models::{BandPolicy, Employee};

/// The band selected for an employee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandMatch<'a> {
    /// The selected band.
    pub band: &'a BandPolicy,
    /// Zero-based position of the band in the stored collection.
    pub position: usize,
    /// Number of bands that matched. Greater than 1 means the match was
    /// ambiguous and resolved by stored order.
    pub candidate_count: usize,
}

impl BandMatch<'_> {
    /// Returns true if more than one band matched.
    pub fn is_ambiguous(&self) -> bool {
        self.candidate_count > 1
    }
}

/// Finds the band policy applicable to an employee.
///
/// Returns `None` when no band matches. This is not an error here; callers
/// decide whether an unmatched employee is skipped or rejected.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::match_band;
/// use compensation_engine::models::{BandPolicy, Employee};
///
/// let band: BandPolicy = serde_json::from_str(r#"{
///     "department": "Sales", "position": "Rep", "level": "L1",
///     "region": "North", "tenure_min": "0", "tenure_max": "5"
/// }"#).unwrap();
/// let employee: Employee = serde_json::from_str(r#"{
///     "id": "E-001", "department": "Sales", "position": "Rep",
///     "level": "L1", "region": "North",
///     "tenure_years": "5", "current_salary": "30000"
/// }"#).unwrap();
///
/// let bands = vec![band];
/// let found = match_band(&employee, &bands).unwrap();
/// assert_eq!(found.position, 0);
/// assert!(!found.is_ambiguous());
/// ```
pub fn match_band<'a>(employee: &Employee, bands: &'a [BandPolicy]) -> Option<BandMatch<'a>> {
    let mut candidates = bands.iter().enumerate().filter(|(_, band)| {
        band.matches_keys(employee) && band.covers_tenure(employee.tenure_years)
    });

    let (position, band) = candidates.next()?;
    let candidate_count = 1 + candidates.count();

    Some(BandMatch {
        band,
        position,
        candidate_count,
    })
}
