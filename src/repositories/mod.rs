// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories map rows to domain types and back
// - Input validation is delegated to the domain invariants
// - Every multi-statement write runs in one IMMEDIATE transaction
// - Filters and updates go through the allow-listed clause builder
// - Values are always bound, never interpolated

pub mod employee_repository;
pub mod filter;
pub mod payroll_repository;
pub mod review_repository;

#[cfg(test)]
pub(crate) mod testing;

pub use employee_repository::{EmployeeRepository, SqliteEmployeeRepository};
pub use filter::{ClauseBuilder, FilterError};
pub use payroll_repository::{PayrollRepository, SqlitePayrollRepository};
pub use review_repository::{ReviewRepository, SqliteReviewRepository};

#[cfg(test)]
pub use payroll_repository::MockPayrollRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
