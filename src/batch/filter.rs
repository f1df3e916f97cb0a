//! Employee selection ahead of a batch run.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Narrows a batch to a subset of employees.
///
/// Each list constrains one categorical key; an empty list places no
/// constraint on it. `id_contains` is a case-insensitive substring search on
/// the employee ID.
///
/// # Example
///
/// ```
/// use compensation_engine::batch::EmployeeFilter;
///
/// let filter = EmployeeFilter {
///     departments: vec!["Sales".to_string()],
///     ..EmployeeFilter::default()
/// };
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Departments to keep.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Positions to keep.
    #[serde(default)]
    pub positions: Vec<String>,
    /// Levels to keep.
    #[serde(default)]
    pub levels: Vec<String>,
    /// Regions to keep.
    #[serde(default)]
    pub regions: Vec<String>,
    /// Substring the employee ID must contain.
    #[serde(default)]
    pub id_contains: Option<String>,
}

impl EmployeeFilter {
    /// Returns true if the filter keeps every employee.
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.positions.is_empty()
            && self.levels.is_empty()
            && self.regions.is_empty()
            && self.id_search().is_none()
    }

    /// Returns true if the employee passes the filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        allowed(&self.departments, &employee.department)
            && allowed(&self.positions, &employee.position)
            && allowed(&self.levels, &employee.level)
            && allowed(&self.regions, &employee.region)
            && self.id_search().is_none_or(|needle| {
                employee.id.to_lowercase().contains(&needle.to_lowercase())
            })
    }

    /// Keeps the employees that pass the filter, preserving order.
    pub fn apply(&self, employees: Vec<Employee>) -> Vec<Employee> {
        if self.is_empty() {
            return employees;
        }
        employees.into_iter().filter(|e| self.matches(e)).collect()
    }

    fn id_search(&self) -> Option<&str> {
        self.id_contains
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
    }
}

fn allowed(values: &[String], value: &str) -> bool {
    values.is_empty() || values.iter().any(|v| v == value)
}
