use serde::{Deserialize, Serialize};

/// A person on staff.
/// Reviews and payroll records reference it by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier, always positive
    pub id: i64,

    /// Display name, trimmed and never empty
    pub name: String,
}
