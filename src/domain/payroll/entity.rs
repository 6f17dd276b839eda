use serde::{Deserialize, Serialize};

/// One payroll run for one employee and period.
///
/// `net_pay` is computed once at creation and stored, so historical
/// reports stay stable. Records are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub period: String,
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonuses: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInput {
    pub employee_id: i64,
    pub period: String,
    pub base_salary: f64,
    #[serde(default)]
    pub overtime_hours: f64,
    #[serde(default)]
    pub overtime_rate: f64,
    #[serde(default)]
    pub bonuses: f64,
    #[serde(default)]
    pub deductions: f64,
}

impl PayrollInput {
    pub fn net_pay(&self) -> f64 {
        calculate_net_pay(
            self.base_salary,
            self.overtime_hours,
            self.overtime_rate,
            self.bonuses,
            self.deductions,
        )
    }
}

/// Base salary plus overtime pay plus bonuses minus deductions.
/// Plain f64 arithmetic, no rounding.
pub fn calculate_net_pay(
    base_salary: f64,
    overtime_hours: f64,
    overtime_rate: f64,
    bonuses: f64,
    deductions: f64,
) -> f64 {
    base_salary + (overtime_hours * overtime_rate) + bonuses - deductions
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollFilter {
    pub employee_id: Option<i64>,
    pub period: Option<String>,
}

impl PayrollFilter {
    pub fn employee(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPeriodTotal {
    pub period: String,
    #[serde(rename = "totalNet")]
    pub total: f64,
}

/// Net pay summed per period, newest period first, plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    #[serde(rename = "totalsByPeriod")]
    pub by_period: Vec<PayrollPeriodTotal>,
    #[serde(rename = "grandTotalNet")]
    pub grand_total: f64,
}

impl PayrollTotals {
    pub fn from_periods(by_period: Vec<PayrollPeriodTotal>) -> Self {
        let grand_total = by_period.iter().map(|p| p.total).sum();
        Self {
            by_period,
            grand_total,
        }
    }
}
