//! Classified store failures.
//!
//! Handlers never see a raw `sqlx::Error`; they get a [`StoreError`] that says
//! what kind of failure happened so the API layer can decide how to report it.

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A lookup that had to produce a row found none.
    #[error("Row not found")]
    NotFound,

    /// The write violated a constraint or lost a serialization conflict.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Connectivity(String),

    /// Anything else the backend reported.
    #[error("Store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                // SQLSTATE class 23: integrity constraint violation.
                // SQLSTATE class 40: transaction rollback (serialization, deadlock).
                if code.starts_with("23") || code.starts_with("40") {
                    StoreError::Constraint(format!("{} ({code})", db_err.message()))
                } else {
                    StoreError::Backend(err.to_string())
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connectivity(err.to_string()),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}
