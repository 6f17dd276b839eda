// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod payroll_service;
pub mod review_service;

pub use payroll_service::{PayrollListing, PayrollService};
pub use review_service::{ReviewListing, ReviewService};
