use diesel::result::DatabaseErrorKind;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested row does not exist (or belongs to another store).
    #[error("entity not found")]
    NotFound,
    /// A unique constraint was violated, e.g. a duplicate category name or a
    /// bill-number race.
    #[error("unique constraint violated")]
    Conflict,
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::Conflict
            }
            other => Self::Database(other),
        }
    }
}
