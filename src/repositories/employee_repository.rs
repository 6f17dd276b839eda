// src/repositories/employee_repository.rs
//
// Employee persistence

use std::sync::Arc;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::employee::{normalize_employee_name, Employee};
use crate::error::{AppError, AppResult, Entity};

pub trait EmployeeRepository: Send + Sync {
    /// All employees, ordered by id.
    fn list(&self) -> AppResult<Vec<Employee>>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
    fn create(&self, name: &str) -> AppResult<Employee>;
    fn update(&self, id: i64, name: &str) -> AppResult<Employee>;
    /// Removes the employee together with its reviews and payroll records.
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteEmployeeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_employee(row: &Row) -> Result<Employee, rusqlite::Error> {
        Ok(Employee {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// Existence check on an already checked-out connection, so callers
/// inside a transaction see the same snapshot they write to.
pub(crate) fn employee_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn list(&self) -> AppResult<Vec<Employee>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM employees ORDER BY id ASC")?;

        let employees = stmt
            .query_map([], Self::row_to_employee)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let conn = self.pool.get()?;

        let employee = conn
            .query_row(
                "SELECT id, name FROM employees WHERE id = ?1",
                params![id],
                Self::row_to_employee,
            )
            .optional()?;

        Ok(employee)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        employee_exists(&conn, id)
    }

    fn create(&self, name: &str) -> AppResult<Employee> {
        let name = normalize_employee_name(name)?;
        let conn = self.pool.get()?;

        conn.execute("INSERT INTO employees (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();

        debug!("Created employee {}", id);
        Ok(Employee { id, name })
    }

    fn update(&self, id: i64, name: &str) -> AppResult<Employee> {
        let name = normalize_employee_name(name)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE employees SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::not_found(Entity::Employee, id));
        }

        debug!("Renamed employee {}", id);
        Ok(Employee { id, name })
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::not_found(Entity::Employee, id));
        }

        debug!("Deleted employee {} with its reviews and payroll records", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, PayrollFilter, ReviewFilter};
    use crate::repositories::testing::TestStore;
    use crate::repositories::{PayrollRepository, ReviewRepository};

    #[test]
    fn test_list_empty_store_is_empty_vec() {
        let store = TestStore::new();
        assert_eq!(store.employees.list().unwrap(), Vec::<Employee>::new());
    }

    #[test]
    fn test_create_trims_and_assigns_unique_ids() {
        let store = TestStore::new();
        let alice = store.employees.create("  Alice ").unwrap();
        let bob = store.employees.create("Bob").unwrap();

        assert_eq!(alice.name, "Alice");
        assert!(alice.id > 0);
        assert_ne!(alice.id, bob.id);
        assert_eq!(store.employees.list().unwrap(), vec![alice, bob]);
    }

    #[test]
    fn test_create_blank_name_fails() {
        let store = TestStore::new();
        let err = store.employees.create("   ").unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::Validation { field: "name", .. })
        ));
        assert!(store.employees.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_renames() {
        let store = TestStore::new();
        let alice = store.employee("Alice");

        let updated = store.employees.update(alice.id, " Alicia ").unwrap();
        assert_eq!(updated, Employee { id: alice.id, name: "Alicia".to_string() });
        assert_eq!(store.employees.get_by_id(alice.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_errors() {
        let store = TestStore::new();
        let alice = store.employee("Alice");

        assert!(matches!(
            store.employees.update(alice.id, ""),
            Err(AppError::Domain(DomainError::Validation { .. }))
        ));
        assert!(matches!(
            store.employees.update(999, "Ghost"),
            Err(AppError::NotFound { entity: Entity::Employee, id: 999 })
        ));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = TestStore::new();
        assert!(matches!(
            store.employees.delete(42),
            Err(AppError::NotFound { entity: Entity::Employee, id: 42 })
        ));
    }

    #[test]
    fn test_delete_cascades_to_reviews_and_payroll() {
        let store = TestStore::new();
        let alice = store.employee("Alice");
        let bob = store.employee("Bob");
        let review = store.review(alice.id, "2024-Q4", 4);
        store.review(bob.id, "2024-Q4", 3);
        store.payroll_record(alice.id, "2024-11", 1000.0);
        store.payroll_record(bob.id, "2024-11", 900.0);

        store.employees.delete(alice.id).unwrap();

        assert!(!store.employees.exists(alice.id).unwrap());
        let reviews = store.reviews.list(&ReviewFilter::default()).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].employee_id, bob.id);
        let payroll = store.payroll.list(&PayrollFilter::default()).unwrap();
        assert_eq!(payroll.len(), 1);
        assert_eq!(payroll[0].employee_id, bob.id);

        assert!(matches!(
            store.reviews.transition(review.id, crate::domain::ReviewState::Submitted),
            Err(AppError::NotFound { entity: Entity::PerformanceReview, .. })
        ));
        assert!(matches!(
            store.employees.delete(alice.id),
            Err(AppError::NotFound { .. })
        ));
    }
}
