use crate::domain::{require_text, DomainResult};

/// Returns the name as it must be stored: trimmed and non-empty.
pub fn normalize_employee_name(name: &str) -> DomainResult<String> {
    require_text("name", name)
}

/// Critical Employee Invariants:
///
/// 1. Identity is assigned by the store and never changes
/// 2. Name is never empty after trimming
/// 3. Deleting an employee removes its reviews and payroll records

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(normalize_employee_name("  Alice  ").unwrap(), "Alice");
    }

    #[test]
    fn test_empty_name_fails() {
        let err = normalize_employee_name("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "name", .. }));
    }
}
