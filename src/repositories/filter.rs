// src/repositories/filter.rs
//
// Allow-listed clause builder
//
// Every WHERE condition and every SET assignment used by the repositories
// comes from the constants declared here. A `Clause` cannot be built outside
// this module, and each builder only accepts the clauses of its own query,
// so no caller-supplied text ever reaches the SQL. Values are always bound
// positionally (?1, ?2, ...).

use std::fmt;

use rusqlite::types::Value;
use thiserror::Error;

use crate::domain::{PayrollFilter, ReviewFilter};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("clause `{0}` is not allowed in this query")]
    ClauseNotAllowed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    /// Equality test in a WHERE list
    Equals,
    /// Assignment in a SET list
    Assign,
}

impl Operator {
    fn sql(&self) -> &'static str {
        match self {
            Operator::Equals | Operator::Assign => "=",
        }
    }
}

/// A (column, operator) template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    column: &'static str,
    operator: Operator,
}

impl Clause {
    const fn equals(column: &'static str) -> Self {
        Self {
            column,
            operator: Operator::Equals,
        }
    }

    const fn assign(column: &'static str) -> Self {
        Self {
            column,
            operator: Operator::Assign,
        }
    }

    fn render(&self, placeholder: usize) -> String {
        format!("{} {} ?{}", self.column, self.operator.sql(), placeholder)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ?", self.column, self.operator.sql())
    }
}

// Review queries alias performance_reviews as `r`
pub const REVIEW_EMPLOYEE: Clause = Clause::equals("r.employee_id");
pub const REVIEW_PERIOD: Clause = Clause::equals("r.period");
pub const REVIEW_STATE: Clause = Clause::equals("r.state");

// Payroll queries alias payroll_records as `p`
pub const PAYROLL_EMPLOYEE: Clause = Clause::equals("p.employee_id");
pub const PAYROLL_PERIOD: Clause = Clause::equals("p.period");

pub const SET_REVIEWER: Clause = Clause::assign("reviewer");
pub const SET_RATING: Clause = Clause::assign("rating");
pub const SET_STRENGTHS: Clause = Clause::assign("strengths");
pub const SET_OPPORTUNITIES: Clause = Clause::assign("opportunities");

pub const REVIEW_FILTER_CLAUSES: &[Clause] = &[REVIEW_EMPLOYEE, REVIEW_PERIOD, REVIEW_STATE];
pub const PAYROLL_FILTER_CLAUSES: &[Clause] = &[PAYROLL_EMPLOYEE, PAYROLL_PERIOD];
pub const REVIEW_UPDATE_CLAUSES: &[Clause] =
    &[SET_REVIEWER, SET_RATING, SET_STRENGTHS, SET_OPPORTUNITIES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    And,
    Comma,
}

impl Joiner {
    fn separator(&self) -> &'static str {
        match self {
            Joiner::And => " AND ",
            Joiner::Comma => ", ",
        }
    }
}

/// Collects clauses and their bound values for one statement.
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    allowed: &'static [Clause],
    joiner: Joiner,
    fragments: Vec<String>,
    params: Vec<Value>,
}

impl ClauseBuilder {
    /// Conditions joined with AND.
    pub fn conditions(allowed: &'static [Clause]) -> Self {
        Self::new(allowed, Joiner::And)
    }

    /// Assignments joined with commas.
    pub fn assignments(allowed: &'static [Clause]) -> Self {
        Self::new(allowed, Joiner::Comma)
    }

    fn new(allowed: &'static [Clause], joiner: Joiner) -> Self {
        Self {
            allowed,
            joiner,
            fragments: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn push(&mut self, clause: Clause, value: impl Into<Value>) -> Result<&mut Self, FilterError> {
        if !self.allowed.contains(&clause) {
            return Err(FilterError::ClauseNotAllowed(clause.to_string()));
        }
        self.params.push(value.into());
        self.fragments.push(clause.render(self.params.len()));
        Ok(self)
    }

    pub fn push_opt<V: Into<Value>>(
        &mut self,
        clause: Clause,
        value: Option<V>,
    ) -> Result<&mut Self, FilterError> {
        match value {
            Some(v) => self.push(clause, v),
            None => Ok(self),
        }
    }

    /// Binds a trailing value that belongs to the fixed part of the
    /// statement, returning its placeholder.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        self.params.push(value.into());
        format!("?{}", self.params.len())
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// The joined clauses, without any keyword.
    pub fn sql(&self) -> String {
        self.fragments.join(self.joiner.separator())
    }

    /// ` WHERE ...` or an empty string when nothing constrains the query.
    pub fn where_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.sql())
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Blank periods impose no constraint.
fn period_constraint(period: Option<&str>) -> Option<String> {
    period
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

pub fn review_conditions(filter: &ReviewFilter) -> Result<ClauseBuilder, FilterError> {
    let mut builder = ClauseBuilder::conditions(REVIEW_FILTER_CLAUSES);
    builder
        .push_opt(REVIEW_EMPLOYEE, filter.employee_id)?
        .push_opt(REVIEW_PERIOD, period_constraint(filter.period.as_deref()))?
        .push_opt(REVIEW_STATE, filter.state.map(|s| s.as_str().to_string()))?;
    Ok(builder)
}

pub fn payroll_conditions(filter: &PayrollFilter) -> Result<ClauseBuilder, FilterError> {
    let mut builder = ClauseBuilder::conditions(PAYROLL_FILTER_CLAUSES);
    builder
        .push_opt(PAYROLL_EMPLOYEE, filter.employee_id)?
        .push_opt(PAYROLL_PERIOD, period_constraint(filter.period.as_deref()))?;
    Ok(builder)
}
