//! Error types shared by the photo vault crates
//!
//! This module defines the storage-level errors surfaced while connecting to,
//! preparing and querying the PostgreSQL database.

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A write collided with a unique constraint
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A write referenced a row that does not exist
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Error occurred while applying the embedded migrations
    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify an error returned by a query
    ///
    /// Constraint violations get their own variants so callers can turn them
    /// into client errors; everything else is a `Query` error.
    pub fn from_query(err: SqlxError) -> Self {
        if let SqlxError::Database(db) = &err {
            if db.is_unique_violation() {
                return DatabaseError::UniqueViolation(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return DatabaseError::ForeignKeyViolation(db.message().to_string());
            }
        }
        DatabaseError::Query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_are_query_errors() {
        assert!(matches!(
            DatabaseError::from_query(SqlxError::RowNotFound),
            DatabaseError::Query(SqlxError::RowNotFound)
        ));
        assert!(matches!(
            DatabaseError::from_query(SqlxError::PoolTimedOut),
            DatabaseError::Query(_)
        ));
    }
}
