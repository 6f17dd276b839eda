// src/lib.rs
// Staffbook - Employee, performance review and payroll records
//
// Architecture:
// - Domain-centric: validation and state rules live in the domain
// - Repositories own SQL; every write is one transaction on one connection
// - Explicit: filters and updates are built from allow-listed clauses only
// - Application Layer: shared state and caller-facing error responses

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    calculate_net_pay,
    // Errors
    DomainError,
    // Employee
    Employee,
    // Payroll
    PayrollFilter,
    PayrollInput,
    PayrollPeriodTotal,
    PayrollRecord,
    PayrollTotals,
    // Review
    PerformanceReview,
    ReviewEmployeeAggregate,
    ReviewFilter,
    ReviewInput,
    ReviewState,
    ReviewUpdate,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, Entity};

// ============================================================================
// PUBLIC API - Configuration & Database
// ============================================================================

pub use config::{DatabaseLocation, StoreConfig};
pub use db::{create_connection_pool, initialize_database, open_pool, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    EmployeeRepository, PayrollRepository, ReviewRepository, SqliteEmployeeRepository,
    SqlitePayrollRepository, SqliteReviewRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{PayrollListing, PayrollService, ReviewListing, ReviewService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
