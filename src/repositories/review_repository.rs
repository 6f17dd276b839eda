// src/repositories/review_repository.rs
//
// Performance review persistence
//
// Besides plain mapping this repository owns the review rules that need the
// store to be checked: employee existence on create, partial updates, and
// the atomic state transition.

use std::sync::Arc;

use log::{debug, warn};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};

use crate::db::ConnectionPool;
use crate::domain::review::{
    validate_review_input, validate_review_update, PerformanceReview, ReviewEmployeeAggregate,
    ReviewFilter, ReviewInput, ReviewState, ReviewUpdate,
};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult, Entity};
use crate::repositories::employee_repository::employee_exists;
use crate::repositories::filter::{
    review_conditions, ClauseBuilder, REVIEW_UPDATE_CLAUSES, SET_OPPORTUNITIES, SET_RATING,
    SET_REVIEWER, SET_STRENGTHS,
};

const REVIEW_SELECT: &str = "SELECT r.id, r.employee_id, e.name AS employee_name, r.period,
            r.reviewer, r.rating, r.strengths, r.opportunities, r.state
     FROM performance_reviews r
     JOIN employees e ON e.id = r.employee_id";

#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a new review in the `draft` state.
    fn create(&self, input: &ReviewInput) -> AppResult<PerformanceReview>;

    fn get_by_id(&self, id: i64) -> AppResult<Option<PerformanceReview>>;

    /// Applies the supplied fields only. Never changes the state.
    fn update(&self, id: i64, update: &ReviewUpdate) -> AppResult<PerformanceReview>;

    /// Moves a review one step forward through draft -> submitted -> approved.
    fn transition(&self, id: i64, target: ReviewState) -> AppResult<PerformanceReview>;

    /// Matching reviews, newest (highest id) first.
    fn list(&self, filter: &ReviewFilter) -> AppResult<Vec<PerformanceReview>>;

    /// One entry per employee with at least one matching review.
    fn aggregate(&self, filter: &ReviewFilter) -> AppResult<Vec<ReviewEmployeeAggregate>>;
}

pub struct SqliteReviewRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReviewRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &Row) -> Result<PerformanceReview, rusqlite::Error> {
        let state_str: String = row.get("state")?;

        Ok(PerformanceReview {
            id: row.get("id")?,
            employee_id: row.get("employee_id")?,
            employee_name: row.get("employee_name")?,
            period: row.get("period")?,
            reviewer: row.get("reviewer")?,
            rating: row.get("rating")?,
            strengths: row.get::<_, Option<String>>("strengths")?.unwrap_or_default(),
            opportunities: row
                .get::<_, Option<String>>("opportunities")?
                .unwrap_or_default(),
            state: parse_state(&state_str, 8)?,
        })
    }

    fn row_to_aggregate(row: &Row) -> Result<ReviewEmployeeAggregate, rusqlite::Error> {
        let state_str: String = row.get("latest_state")?;

        Ok(ReviewEmployeeAggregate {
            employee_id: row.get("employee_id")?,
            employee_name: row.get("employee_name")?,
            average_rating: row.get("average_rating")?,
            latest_state: parse_state(&state_str, 4)?,
            count: row.get("review_count")?,
        })
    }
}

/// Stored states are constrained by the schema; anything else is corruption
/// and surfaces as a conversion failure, not a default.
fn parse_state(raw: &str, column: usize) -> Result<ReviewState, rusqlite::Error> {
    raw.parse::<ReviewState>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn fetch_review(conn: &Connection, id: i64) -> AppResult<Option<PerformanceReview>> {
    let review = conn
        .query_row(
            &format!("{} WHERE r.id = ?1", REVIEW_SELECT),
            params![id],
            SqliteReviewRepository::row_to_review,
        )
        .optional()?;
    Ok(review)
}

fn current_state(conn: &Connection, id: i64) -> AppResult<Option<ReviewState>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT state FROM performance_reviews WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(raw.map(|s| parse_state(&s, 0)).transpose()?)
}

impl ReviewRepository for SqliteReviewRepository {
    fn create(&self, input: &ReviewInput) -> AppResult<PerformanceReview> {
        let input = validate_review_input(input)?;

        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !employee_exists(&tx, input.employee_id)? {
            return Err(AppError::not_found(Entity::Employee, input.employee_id));
        }

        tx.execute(
            "INSERT INTO performance_reviews
                (employee_id, period, reviewer, rating, strengths, opportunities, state)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                input.employee_id,
                input.period,
                input.reviewer,
                input.rating,
                input.strengths,
                input.opportunities,
                ReviewState::Draft.as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        let review = fetch_review(&tx, id)?
            .ok_or_else(|| AppError::not_found(Entity::PerformanceReview, id))?;
        tx.commit()?;

        debug!("Created review {} for employee {}", id, review.employee_id);
        Ok(review)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<PerformanceReview>> {
        let conn = self.pool.get()?;
        fetch_review(&conn, id)
    }

    fn update(&self, id: i64, update: &ReviewUpdate) -> AppResult<PerformanceReview> {
        let update = validate_review_update(update)?;
        let conn = self.pool.get()?;

        if update.is_empty() {
            return fetch_review(&conn, id)?
                .ok_or_else(|| AppError::not_found(Entity::PerformanceReview, id));
        }

        let mut assignments = ClauseBuilder::assignments(REVIEW_UPDATE_CLAUSES);
        assignments
            .push_opt(SET_REVIEWER, update.reviewer)?
            .push_opt(SET_RATING, update.rating)?
            .push_opt(SET_STRENGTHS, update.strengths)?
            .push_opt(SET_OPPORTUNITIES, update.opportunities)?;
        let id_placeholder = assignments.bind(id);

        let sql = format!(
            "UPDATE performance_reviews SET {} WHERE id = {}",
            assignments.sql(),
            id_placeholder
        );
        let rows_affected = conn.execute(&sql, params_from_iter(assignments.params()))?;

        if rows_affected == 0 {
            return Err(AppError::not_found(Entity::PerformanceReview, id));
        }

        debug!("Updated {} field(s) of review {}", assignments.len(), id);
        fetch_review(&conn, id)?.ok_or_else(|| AppError::not_found(Entity::PerformanceReview, id))
    }

    fn transition(&self, id: i64, target: ReviewState) -> AppResult<PerformanceReview> {
        let mut conn = self.pool.get()?;

        // IMMEDIATE takes the write lock up front, so the state read below
        // cannot go stale before the update runs.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = current_state(&tx, id)?
            .ok_or_else(|| AppError::not_found(Entity::PerformanceReview, id))?;

        let next = current.transition_to(target).map_err(|e| {
            warn!("Rejected transition of review {}: {}", id, e);
            e
        })?;

        let rows_affected = tx.execute(
            "UPDATE performance_reviews SET state = ?1 WHERE id = ?2 AND state = ?3",
            params![next.as_str(), id, current.as_str()],
        )?;

        if rows_affected == 0 {
            let observed = current_state(&tx, id)?;
            warn!(
                "Review {} changed state concurrently (now {:?}); transition to {} dropped",
                id, observed, target
            );
            return Err(match observed {
                Some(from) => DomainError::InvalidTransition { from, to: target }.into(),
                None => AppError::not_found(Entity::PerformanceReview, id),
            });
        }

        let review = fetch_review(&tx, id)?
            .ok_or_else(|| AppError::not_found(Entity::PerformanceReview, id))?;
        tx.commit()?;

        debug!("Review {} moved {} -> {}", id, current, next);
        Ok(review)
    }

    fn list(&self, filter: &ReviewFilter) -> AppResult<Vec<PerformanceReview>> {
        let conditions = review_conditions(filter)?;
        let conn = self.pool.get()?;

        let sql = format!("{}{} ORDER BY r.id DESC", REVIEW_SELECT, conditions.where_sql());
        let mut stmt = conn.prepare(&sql)?;

        let reviews = stmt
            .query_map(params_from_iter(conditions.params()), Self::row_to_review)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reviews)
    }

    fn aggregate(&self, filter: &ReviewFilter) -> AppResult<Vec<ReviewEmployeeAggregate>> {
        let conditions = review_conditions(filter)?;
        let conn = self.pool.get()?;

        // The latest state is taken from the matching rows only, so it agrees
        // with the count and average reported next to it.
        let sql = format!(
            "WITH matching AS (
                 SELECT r.id, r.employee_id, r.rating, r.state
                 FROM performance_reviews r{}
             )
             SELECT m.employee_id AS employee_id,
                    e.name AS employee_name,
                    AVG(m.rating) AS average_rating,
                    COUNT(*) AS review_count,
                    (SELECT latest.state FROM matching latest
                      WHERE latest.employee_id = m.employee_id
                      ORDER BY latest.id DESC LIMIT 1) AS latest_state
             FROM matching m
             JOIN employees e ON e.id = m.employee_id
             GROUP BY m.employee_id, e.name
             ORDER BY m.employee_id ASC",
            conditions.where_sql()
        );
        let mut stmt = conn.prepare(&sql)?;

        let aggregates = stmt
            .query_map(params_from_iter(conditions.params()), Self::row_to_aggregate)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(aggregates)
    }
}
