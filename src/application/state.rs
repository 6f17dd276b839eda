// src/application/state.rs

use std::sync::Arc;

use log::info;

use crate::config::StoreConfig;
use crate::db::{open_pool, ConnectionPool};
use crate::error::AppResult;
use crate::repositories::{
    EmployeeRepository, PayrollRepository, ReviewRepository, SqliteEmployeeRepository,
    SqlitePayrollRepository, SqliteReviewRepository,
};
use crate::services::{PayrollService, ReviewService};

/// Application state shared by every request handler.
/// All fields are Arc-wrapped for thread-safe sharing; every repository
/// draws from the same pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub payroll: Arc<dyn PayrollRepository>,
    pub review_service: Arc<ReviewService>,
    pub payroll_service: Arc<PayrollService>,
}

impl AppState {
    /// Opens the store described by `config`, applying the schema if needed.
    pub fn open(config: &StoreConfig) -> AppResult<Self> {
        let pool = open_pool(config)?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: Arc<ConnectionPool>) -> Self {
        let employees: Arc<dyn EmployeeRepository> =
            Arc::new(SqliteEmployeeRepository::new(Arc::clone(&pool)));
        let reviews: Arc<dyn ReviewRepository> =
            Arc::new(SqliteReviewRepository::new(Arc::clone(&pool)));
        let payroll: Arc<dyn PayrollRepository> =
            Arc::new(SqlitePayrollRepository::new(Arc::clone(&pool)));

        let review_service = Arc::new(ReviewService::new(Arc::clone(&reviews)));
        let payroll_service = Arc::new(PayrollService::new(Arc::clone(&payroll)));

        info!("Application state initialized");

        Self {
            pool,
            employees,
            reviews,
            payroll,
            review_service,
            payroll_service,
        }
    }
}
