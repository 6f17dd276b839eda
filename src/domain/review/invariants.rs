use super::entity::{ReviewInput, ReviewUpdate};
use crate::domain::{require_text, DomainError, DomainResult};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Validates a new review and returns it with its text fields trimmed.
pub fn validate_review_input(input: &ReviewInput) -> DomainResult<ReviewInput> {
    if input.employee_id <= 0 {
        return Err(DomainError::validation("employeeId", "employee is required"));
    }
    let period = require_text("period", &input.period)?;
    let reviewer = require_text("reviewer", &input.reviewer)?;
    validate_rating(input.rating)?;

    Ok(ReviewInput {
        employee_id: input.employee_id,
        period,
        reviewer,
        rating: input.rating,
        strengths: input.strengths.trim().to_string(),
        opportunities: input.opportunities.trim().to_string(),
    })
}

/// Validates the supplied fields of a partial update and returns them trimmed.
/// Fields that were not supplied stay `None`.
pub fn validate_review_update(update: &ReviewUpdate) -> DomainResult<ReviewUpdate> {
    let reviewer = update
        .reviewer
        .as_deref()
        .map(|r| require_text("reviewer", r))
        .transpose()?;
    if let Some(rating) = update.rating {
        validate_rating(rating)?;
    }

    Ok(ReviewUpdate {
        reviewer,
        rating: update.rating,
        strengths: update.strengths.as_deref().map(|s| s.trim().to_string()),
        opportunities: update.opportunities.as_deref().map(|s| s.trim().to_string()),
    })
}

pub fn validate_rating(rating: i32) -> DomainResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::validation(
            "rating",
            format!("rating must be between {} and {}", MIN_RATING, MAX_RATING),
        ));
    }
    Ok(())
}

/// Critical Review Invariants:
///
/// 1. A review belongs to exactly one existing employee
/// 2. Period and reviewer are never empty
/// 3. Rating stays within 1..=5, on create and on update
/// 4. New reviews are drafts
/// 5. State only moves draft -> submitted -> approved
/// 6. Field updates never touch the state
