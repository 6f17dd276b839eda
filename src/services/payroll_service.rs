// src/services/payroll_service.rs
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{PayrollFilter, PayrollPeriodTotal, PayrollRecord};
use crate::error::AppResult;
use crate::repositories::PayrollRepository;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollListing {
    pub items: Vec<PayrollRecord>,
    pub totals_by_period: Vec<PayrollPeriodTotal>,
    pub grand_total_net: f64,
}

pub struct PayrollService {
    payroll: Arc<dyn PayrollRepository>,
}

impl PayrollService {
    pub fn new(payroll: Arc<dyn PayrollRepository>) -> Self {
        Self { payroll }
    }

    /// Matching records plus their per-period and grand totals.
    pub fn list_with_totals(&self, filter: &PayrollFilter) -> AppResult<PayrollListing> {
        let items = self.payroll.list(filter)?;
        let totals = self.payroll.totals(filter)?;

        debug!(
            "Listed {} payroll records over {} periods",
            items.len(),
            totals.by_period.len()
        );
        Ok(PayrollListing {
            items,
            totals_by_period: totals.by_period,
            grand_total_net: totals.grand_total,
        })
    }
}
