// src/repositories/testing.rs
//
// Shared fixtures for repository tests: a file-backed pool inside a
// temporary directory, plus seeding helpers.

use std::sync::Arc;

use tempfile::TempDir;

use crate::config::StoreConfig;
use crate::db::{open_pool, ConnectionPool};
use crate::domain::{Employee, PayrollInput, PerformanceReview, ReviewInput};
use crate::repositories::{
    EmployeeRepository, PayrollRepository, ReviewRepository, SqliteEmployeeRepository,
    SqlitePayrollRepository, SqliteReviewRepository,
};

pub struct TestStore {
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
    pub pool: Arc<ConnectionPool>,
    pub employees: SqliteEmployeeRepository,
    pub reviews: SqliteReviewRepository,
    pub payroll: SqlitePayrollRepository,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = StoreConfig::file(dir.path().join("staffbook-test.db"));
        config.max_connections = 4;
        let pool = open_pool(&config).expect("open pool");

        Self {
            _dir: dir,
            employees: SqliteEmployeeRepository::new(pool.clone()),
            reviews: SqliteReviewRepository::new(pool.clone()),
            payroll: SqlitePayrollRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn employee(&self, name: &str) -> Employee {
        self.employees.create(name).expect("create employee")
    }

    pub fn review(&self, employee_id: i64, period: &str, rating: i32) -> PerformanceReview {
        self.reviews
            .create(&review_input(employee_id, period, rating))
            .expect("create review")
    }

    pub fn payroll_record(&self, employee_id: i64, period: &str, base_salary: f64) -> f64 {
        self.payroll
            .create(&PayrollInput {
                employee_id,
                period: period.to_string(),
                base_salary,
                ..Default::default()
            })
            .expect("create payroll record")
            .net_pay
    }
}

pub fn review_input(employee_id: i64, period: &str, rating: i32) -> ReviewInput {
    ReviewInput {
        employee_id,
        period: period.to_string(),
        reviewer: "Manager".to_string(),
        rating,
        strengths: "strength".to_string(),
        opportunities: "area".to_string(),
    }
}
