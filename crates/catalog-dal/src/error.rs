use crate::validation::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure of the underlying document store, passed to callers as is
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid filter field: {0}")]
    InvalidFilterField(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Error::Store(StoreError::DatabaseError(value))
    }
}
