// src/error/types.rs
use std::fmt;

use crate::domain::DomainError;
use crate::repositories::filter::FilterError;
use thiserror::Error;

/// Persisted entity kinds, used to say what was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Employee,
    PerformanceReview,
    PayrollRecord,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Employee => write!(f, "employee"),
            Entity::PerformanceReview => write!(f, "performance review"),
            Entity::PayrollRecord => write!(f, "payroll record"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    /// True for failures of the store itself rather than of the request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_)
        )
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Other(format!("Query composition error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
