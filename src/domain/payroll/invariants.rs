use super::entity::PayrollInput;
use crate::domain::{require_text, DomainError, DomainResult};

/// Validates a payroll input and returns it with the period trimmed.
///
/// Bonuses and deductions may have any sign. Every amount, and the net pay
/// they produce, must be finite.
pub fn validate_payroll_input(input: &PayrollInput) -> DomainResult<PayrollInput> {
    if input.employee_id <= 0 {
        return Err(DomainError::validation("employeeId", "employee is required"));
    }
    let period = require_text("period", &input.period)?;

    require_non_negative("baseSalary", input.base_salary)?;
    require_non_negative("overtimeHours", input.overtime_hours)?;
    require_non_negative("overtimeRate", input.overtime_rate)?;
    require_finite("bonuses", input.bonuses)?;
    require_finite("deductions", input.deductions)?;

    // Finite inputs can still overflow once combined.
    if !input.net_pay().is_finite() {
        return Err(DomainError::validation(
            "netPay",
            "netPay is out of range for the given amounts",
        ));
    }

    Ok(PayrollInput {
        period,
        ..input.clone()
    })
}

fn require_finite(field: &'static str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(
            field,
            format!("{} must be a finite number", field),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> DomainResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(DomainError::validation(field, format!("{} must be >= 0", field)));
    }
    Ok(())
}
