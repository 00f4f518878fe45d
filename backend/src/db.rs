//! Query helpers shared by the services
//!
//! Soft-deleted rows stay in their tables with `is_active = FALSE`. Every
//! query that hides them says so explicitly through [`active`] or
//! [`push_active`].

use shared::TimeWindow;
use sqlx::{Postgres, QueryBuilder};

use crate::error::AppError;

/// Visibility predicate for rows of `alias`
pub fn active(alias: &str) -> String {
    format!("{alias}.is_active = TRUE")
}

pub fn push_active(qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
    qb.push(active(alias));
}

/// Restrict `column` to a reporting window, honouring its end bound
pub fn push_window(qb: &mut QueryBuilder<'_, Postgres>, column: &str, window: &TimeWindow) {
    qb.push(column)
        .push(" >= ")
        .push_bind(window.start)
        .push(" AND ")
        .push(column)
        .push(" ")
        .push(window.end_operator())
        .push(" ")
        .push_bind(window.end);
}

/// Translate constraint violations into client errors.
///
/// Unique violations name `duplicate`; foreign-key violations report
/// `missing` as not found. Everything else stays a database error.
pub fn map_constraint_violation(err: sqlx::Error, duplicate: &str, missing: &str) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEntry(duplicate.to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::NotFound(missing.to_string())
        }
        other => other.into(),
    }
}
