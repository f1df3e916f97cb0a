//! Running the recommendation pipeline over employees.
//!
//! [`BatchRunner`] applies scoring, band matching, prompt construction and
//! the recommendation engine to each employee in turn, either one record at
//! a time or across a whole collection with partial-failure tolerance.

mod filter;
mod runner;

pub use filter::EmployeeFilter;
pub use runner::{
    AMBIGUOUS_BAND, BatchRunner, NEW_SALARY_MISMATCH, RAISE_OUTSIDE_POLICY, SALARY_ABOVE_BAND,
    consistency_warnings,
};
