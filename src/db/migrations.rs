// src/db/migrations.rs
//
// Schema versioning
//
// The schema is shipped as a single script (`schema.sql`) tagged with a
// version number. A fresh database gets the script; a database already at
// that version is left alone; any other version is refused, since there is
// no upgrade path to run.

use std::cmp::Ordering;

use log::info;
use rusqlite::Connection;

use crate::error::{AppError, AppResult};

const SCHEMA_SQL: &str = include_str!("../../schema.sql");

/// Version written by `SCHEMA_SQL`.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Brings a connection's database to the current schema. Safe to repeat.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let found = schema_version(conn)?;

    match found.cmp(&CURRENT_SCHEMA_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Less if found == 0 => {
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| AppError::Other(format!("Failed to apply schema: {}", e)))?;
            record_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
            info!("Applied schema version {}", CURRENT_SCHEMA_VERSION);
            Ok(())
        }
        Ordering::Less => Err(AppError::Other(format!(
            "Database is at schema version {} but {} is required; no upgrade is available",
            found, CURRENT_SCHEMA_VERSION
        ))),
        Ordering::Greater => Err(AppError::Other(format!(
            "Database schema version {} was written by a newer staffbook (supports {})",
            found, CURRENT_SCHEMA_VERSION
        ))),
    }
}

/// 0 for a database that has never been initialized.
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn record_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Fails unless `PRAGMA integrity_check` reports `ok`.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let report: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if report == "ok" {
        Ok(())
    } else {
        Err(AppError::Other(format!("Integrity check failed: {}", report)))
    }
}

/// Size and row counts, logged when a store is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub employee_count: i64,
    pub review_count: i64,
    pub payroll_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let size_bytes: i64 = conn.query_row(
        "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
        [],
        |row| row.get(0),
    )?;
    let (employee_count, review_count, payroll_count) = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM employees),
                (SELECT COUNT(*) FROM performance_reviews),
                (SELECT COUNT(*) FROM payroll_records)",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(DatabaseStats {
        size_bytes,
        employee_count,
        review_count,
        payroll_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    fn initialized() -> Connection {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        let tables: Vec<String> = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            tables,
            vec!["employees", "payroll_records", "performance_reviews", "schema_version"]
        );
    }

    #[test]
    fn test_initialize_twice_keeps_one_version_row() {
        let conn = initialized();
        initialize_database(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = initialized();
        record_schema_version(&conn, CURRENT_SCHEMA_VERSION + 1).unwrap();

        assert!(matches!(initialize_database(&conn), Err(AppError::Other(_))));
    }

    #[test]
    fn test_review_needs_existing_employee() {
        let conn = initialized();

        let orphan = conn.execute(
            "INSERT INTO performance_reviews (employee_id, period, reviewer, rating, state)
             VALUES (999, '2024-Q4', 'Boss', 3, 'draft')",
            [],
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn test_rating_and_state_checks() {
        let conn = initialized();
        conn.execute("INSERT INTO employees (name) VALUES ('Alice')", [])
            .unwrap();

        let bad_rating = conn.execute(
            "INSERT INTO performance_reviews (employee_id, period, reviewer, rating, state)
             VALUES (1, '2024-Q4', 'Boss', 6, 'draft')",
            [],
        );
        assert!(bad_rating.is_err());

        let bad_state = conn.execute(
            "INSERT INTO performance_reviews (employee_id, period, reviewer, rating, state)
             VALUES (1, '2024-Q4', 'Boss', 3, 'archived')",
            [],
        );
        assert!(bad_state.is_err());
    }

    #[test]
    fn test_stats_count_rows() {
        let conn = initialized();
        conn.execute("INSERT INTO employees (name) VALUES ('Alice')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO payroll_records
                (employee_id, period, base_salary, overtime_hours, overtime_rate,
                 bonuses, deductions, net_pay)
             VALUES (1, '2024-11', 1000, 0, 0, 0, 0, 1000)",
            [],
        )
        .unwrap();

        let stats = get_database_stats(&conn).unwrap();
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.employee_count, 1);
        assert_eq!(stats.review_count, 0);
        assert_eq!(stats.payroll_count, 1);
    }

    #[test]
    fn test_integrity_check_passes_on_fresh_schema() {
        verify_database_integrity(&initialized()).unwrap();
    }
}
