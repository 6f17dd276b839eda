// src/repositories/payroll_repository.rs
//
// Payroll persistence. Records are write-once: net pay is computed here at
// creation and stored alongside its inputs.

use std::sync::Arc;

use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};

use crate::db::ConnectionPool;
use crate::domain::payroll::{
    validate_payroll_input, PayrollFilter, PayrollInput, PayrollPeriodTotal, PayrollRecord,
    PayrollTotals,
};
use crate::error::{AppError, AppResult, Entity};
use crate::repositories::employee_repository::employee_exists;
use crate::repositories::filter::payroll_conditions;

const PAYROLL_SELECT: &str = "SELECT p.id, p.employee_id, e.name AS employee_name, p.period,
            p.base_salary, p.overtime_hours, p.overtime_rate, p.bonuses, p.deductions, p.net_pay
     FROM payroll_records p
     JOIN employees e ON e.id = p.employee_id";

#[cfg_attr(test, mockall::automock)]
pub trait PayrollRepository: Send + Sync {
    fn create(&self, input: &PayrollInput) -> AppResult<PayrollRecord>;

    fn get_by_id(&self, id: i64) -> AppResult<Option<PayrollRecord>>;

    /// Matching records, newest period first, then highest id first.
    fn list(&self, filter: &PayrollFilter) -> AppResult<Vec<PayrollRecord>>;

    /// Net pay per period plus the grand total over those periods.
    fn totals(&self, filter: &PayrollFilter) -> AppResult<PayrollTotals>;
}

pub struct SqlitePayrollRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePayrollRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<PayrollRecord, rusqlite::Error> {
        Ok(PayrollRecord {
            id: row.get("id")?,
            employee_id: row.get("employee_id")?,
            employee_name: row.get("employee_name")?,
            period: row.get("period")?,
            base_salary: row.get("base_salary")?,
            overtime_hours: row.get("overtime_hours")?,
            overtime_rate: row.get("overtime_rate")?,
            bonuses: row.get("bonuses")?,
            deductions: row.get("deductions")?,
            net_pay: row.get("net_pay")?,
        })
    }
}

fn fetch_record(conn: &Connection, id: i64) -> AppResult<Option<PayrollRecord>> {
    let record = conn
        .query_row(
            &format!("{} WHERE p.id = ?1", PAYROLL_SELECT),
            params![id],
            SqlitePayrollRepository::row_to_record,
        )
        .optional()?;
    Ok(record)
}

impl PayrollRepository for SqlitePayrollRepository {
    fn create(&self, input: &PayrollInput) -> AppResult<PayrollRecord> {
        let input = validate_payroll_input(input)?;
        let net_pay = input.net_pay();

        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !employee_exists(&tx, input.employee_id)? {
            return Err(AppError::not_found(Entity::Employee, input.employee_id));
        }

        tx.execute(
            "INSERT INTO payroll_records
                (employee_id, period, base_salary, overtime_hours, overtime_rate,
                 bonuses, deductions, net_pay)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                input.employee_id,
                input.period,
                input.base_salary,
                input.overtime_hours,
                input.overtime_rate,
                input.bonuses,
                input.deductions,
                net_pay,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let record = fetch_record(&tx, id)?
            .ok_or_else(|| AppError::not_found(Entity::PayrollRecord, id))?;
        tx.commit()?;

        debug!(
            "Created payroll record {} for employee {} ({})",
            id, record.employee_id, record.period
        );
        Ok(record)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<PayrollRecord>> {
        let conn = self.pool.get()?;
        fetch_record(&conn, id)
    }

    fn list(&self, filter: &PayrollFilter) -> AppResult<Vec<PayrollRecord>> {
        let conditions = payroll_conditions(filter)?;
        let conn = self.pool.get()?;

        let sql = format!(
            "{}{} ORDER BY p.period DESC, p.id DESC",
            PAYROLL_SELECT,
            conditions.where_sql()
        );
        let mut stmt = conn.prepare(&sql)?;

        let records = stmt
            .query_map(params_from_iter(conditions.params()), Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn totals(&self, filter: &PayrollFilter) -> AppResult<PayrollTotals> {
        let conditions = payroll_conditions(filter)?;
        let conn = self.pool.get()?;

        let sql = format!(
            "SELECT p.period, SUM(p.net_pay) AS total
             FROM payroll_records p{}
             GROUP BY p.period
             ORDER BY p.period DESC",
            conditions.where_sql()
        );
        let mut stmt = conn.prepare(&sql)?;

        let by_period = stmt
            .query_map(params_from_iter(conditions.params()), |row| {
                Ok(PayrollPeriodTotal {
                    period: row.get("period")?,
                    total: row.get("total")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PayrollTotals::from_periods(by_period))
    }
}
