use serde::{Deserialize, Serialize};

use super::state::ReviewState;

/// A periodic performance review of one employee.
/// Reads always carry the employee's current name for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,

    /// Free-form label such as "2024-Q4"
    pub period: String,
    pub reviewer: String,

    /// 1 to 5 inclusive
    pub rating: i32,
    pub strengths: String,
    pub opportunities: String,
    pub state: ReviewState,
}

/// Fields accepted when creating a review. The state is not one of them:
/// every review starts as a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub employee_id: i64,
    pub period: String,
    pub reviewer: String,
    pub rating: i32,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub opportunities: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub reviewer: Option<String>,
    pub rating: Option<i32>,
    pub strengths: Option<String>,
    pub opportunities: Option<String>,
}

impl ReviewUpdate {
    pub fn is_empty(&self) -> bool {
        self.reviewer.is_none()
            && self.rating.is_none()
            && self.strengths.is_none()
            && self.opportunities.is_none()
    }
}

/// Conjunction of optional equality constraints for list and aggregate
/// queries. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    pub employee_id: Option<i64>,
    pub period: Option<String>,
    pub state: Option<ReviewState>,
}

impl ReviewFilter {
    pub fn employee(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn state(mut self, state: ReviewState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Per-employee summary of the reviews matching a filter.
/// Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEmployeeAggregate {
    pub employee_id: i64,
    pub employee_name: String,
    pub average_rating: f64,

    /// State of the matching review with the highest id
    pub latest_state: ReviewState,
    pub count: i64,
}
