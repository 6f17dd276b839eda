// src/config.rs
//
// Store configuration
//
// Read once by the host process; nothing in the crate reads the
// environment behind its back.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Environment variable naming the database file (`:memory:` for an
/// in-memory store)
pub const DB_DSN_ENV: &str = "DB_DSN";

/// Environment variable overriding the pool size
pub const POOL_SIZE_ENV: &str = "STAFFBOOK_POOL_SIZE";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Private in-memory database, served by a single-connection pool
    Memory,
}

impl DatabaseLocation {
    pub fn parse(dsn: &str) -> Self {
        match dsn.trim() {
            ":memory:" => DatabaseLocation::Memory,
            path => DatabaseLocation::File(PathBuf::from(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DatabaseLocation,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn memory() -> Self {
        Self {
            location: DatabaseLocation::Memory,
            max_connections: 1,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Builds the config from `DB_DSN` and `STAFFBOOK_POOL_SIZE`, falling
    /// back to the default database path.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = match lookup(DB_DSN_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dsn) => match DatabaseLocation::parse(&dsn) {
                DatabaseLocation::Memory => Self::memory(),
                DatabaseLocation::File(path) => Self::file(path),
            },
            None => Self::file(default_database_path()?),
        };

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            let size: u32 = raw.trim().parse().map_err(|_| {
                AppError::Other(format!("{} must be a positive integer, got '{}'", POOL_SIZE_ENV, raw))
            })?;
            if size == 0 {
                return Err(AppError::Other(format!("{} must be at least 1", POOL_SIZE_ENV)));
            }
            if config.location != DatabaseLocation::Memory {
                config.max_connections = size;
            }
        }

        Ok(config)
    }
}

/// Get the default database file path
///
/// Path structure: {APP_DATA}/staffbook/staffbook.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let staffbook_dir = app_data_dir.join("staffbook");
    std::fs::create_dir_all(&staffbook_dir)?;

    Ok(staffbook_dir.join("staffbook.db"))
}
