use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod bills;
pub mod categories;
pub mod customers;
pub mod notifications;
pub mod render;
pub mod settings;
pub mod stores;

/// Result type returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer and translated to HTTP statuses at
/// the route boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,
    /// The resource exists but belongs to a different store.
    #[error("resource belongs to another store")]
    CrossTenant,
    /// A uniqueness constraint was violated or the resource is still in use.
    #[error("conflicting resource state")]
    Conflict,
    /// No billable line survived validation.
    #[error("no valid bill items")]
    NoValidItems,
    /// A form payload failed validation or sanitization.
    #[error("{0}")]
    Form(String),
    /// Anything unexpected from the persistence layer.
    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict => Self::Conflict,
            other => Self::Repository(other),
        }
    }
}
