// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Wires one connection pool into repositories and services
// - Translates AppError into caller-facing error responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
