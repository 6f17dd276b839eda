// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod employee;
pub mod payroll;
pub mod review;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Employee Domain
pub use employee::{normalize_employee_name, Employee};

// Review Domain
pub use review::{
    validate_rating, validate_review_input, validate_review_update, PerformanceReview,
    ReviewEmployeeAggregate, ReviewFilter, ReviewInput, ReviewState, ReviewUpdate,
};

// Payroll Domain
pub use payroll::{
    calculate_net_pay, validate_payroll_input, PayrollFilter, PayrollInput, PayrollPeriodTotal,
    PayrollRecord, PayrollTotals,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field}: {rule}")]
    Validation { field: &'static str, rule: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: ReviewState, to: ReviewState },
}

impl DomainError {
    pub fn validation(field: &'static str, rule: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            rule: rule.into(),
        }
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Trims a required text field, rejecting it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
