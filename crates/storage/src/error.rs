//! Typed error enum for the storage layer.
//!
//! Lets callers tell constraint violations and lock contention apart from
//! plain I/O failures without downcasting.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage-layer error covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Unique or foreign-key constraint violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// SQL / I/O / locking failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A stored value could not be decoded into its domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema creation or upgrade failed.
    #[error("migration error: {0}")]
    Migration(#[source] rusqlite::Error),
}

impl StoreError {
    /// Whether the database was locked by another connection past the busy timeout.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }

    /// Whether this error is a constraint violation.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

/// Custom `From<rusqlite::Error>`, not a blanket `#[from]`:
/// constraint failures get their own variant.
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                Self::Constraint(msg.clone().unwrap_or_else(|| err.to_string()))
            },
            _ => Self::Database(err),
        }
    }
}
