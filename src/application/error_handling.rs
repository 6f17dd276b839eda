// src/application/error_handling.rs
//
// Error responses for callers
//
// ARCHITECTURE:
// - Maps AppError → caller-facing responses
// - Request failures (validation, not found, transition) keep their message
// - Storage and internal failures are logged in full and returned opaque

use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::{AppError, AppResult};

/// Standard error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Referenced entity absent (404)
    NotFound,

    /// Input violates a field rule (400)
    Validation,

    /// Review state change not allowed from the current state (409)
    InvalidTransition,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(err: AppError) -> Self {
        match err {
            AppError::NotFound { .. } => Self::new(ErrorType::NotFound, err.to_string(), None),

            AppError::Domain(DomainError::Validation { field, rule }) => {
                Self::new(ErrorType::Validation, rule, Some(field.to_string()))
            }

            AppError::Domain(transition @ DomainError::InvalidTransition { .. }) => {
                Self::new(ErrorType::InvalidTransition, transition.to_string(), None)
            }

            AppError::Database(db_error) => {
                error!("Database error: {:?}", db_error);
                Self::new(ErrorType::Database, "Database operation failed", None)
            }

            AppError::Pool(pool_error) => {
                error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Database, "Database file operation failed", None)
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Other(message) => {
                error!("Internal error: {}", message);
                Self::new(ErrorType::Internal, "Internal error", None)
            }
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Helper trait to convert Results to serialized ErrorResponse strings
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for AppResult<T> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            ErrorResponse::from_app_error(e)
                .to_json()
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}
