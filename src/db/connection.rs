// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use std::sync::Arc;

use log::info;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::config::{DatabaseLocation, StoreConfig};
use crate::db::migrations::{get_database_stats, initialize_database, verify_database_integrity};
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool
///
/// Every connection gets:
/// - Foreign keys enabled (cascade deletes depend on it)
/// - WAL journal for file databases
/// - Busy timeout so concurrent writers wait instead of failing
///
/// A memory database lives inside a single connection, so its pool holds
/// exactly one connection that is never recycled.
pub fn create_connection_pool(config: &StoreConfig) -> AppResult<ConnectionPool> {
    let busy_timeout_ms = config.busy_timeout_ms;

    let (manager, builder) = match &config.location {
        DatabaseLocation::File(path) => {
            let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
                conn.execute_batch(&format!(
                    "PRAGMA foreign_keys = ON;
                     PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = {};",
                    busy_timeout_ms
                ))
            });
            (manager, Pool::builder().max_size(config.max_connections))
        }
        DatabaseLocation::Memory => {
            let manager = SqliteConnectionManager::memory()
                .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
            let builder = Pool::builder()
                .max_size(1)
                .max_lifetime(None)
                .idle_timeout(None);
            (manager, builder)
        }
    };

    let pool = builder
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    info!(
        "Opened database pool ({:?}, max {} connections)",
        config.location,
        pool.max_size()
    );
    Ok(pool)
}

/// Create a pool, bring its schema up to date and check the file is sound.
pub fn open_pool(config: &StoreConfig) -> AppResult<Arc<ConnectionPool>> {
    let pool = create_connection_pool(config)?;
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        info!(
            "Store ready: {} employees, {} reviews, {} payroll records ({} bytes)",
            stats.employee_count, stats.review_count, stats.payroll_count, stats.size_bytes
        );
    }
    Ok(Arc::new(pool))
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_pool_enables_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&StoreConfig::file(dir.path().join("pool.db"))).unwrap();
        let conn = get_connection(&pool).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);

        let journal: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");
    }

    #[test]
    fn test_memory_pool_shares_one_database() {
        let pool = open_pool(&StoreConfig::memory()).unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute("INSERT INTO employees (name) VALUES ('Alice')", [])
                .unwrap();
        }
        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_reopening_file_store_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::file(dir.path().join("reopen.db"));
        {
            let pool = open_pool(&config).unwrap();
            let conn = get_connection(&pool).unwrap();
            conn.execute("INSERT INTO employees (name) VALUES ('Alice')", [])
                .unwrap();
        }

        let pool = open_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();
        assert_eq!(get_database_stats(&conn).unwrap().employee_count, 1);
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
