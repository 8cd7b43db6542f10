use sea_orm::DbErr;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(e) => Self::ConnectionError(e.to_string()),
            DbErr::ConnectionAcquire(e) => Self::ConnectionError(e.to_string()),
            DbErr::RecordNotFound(what) => Self::NotFound(what),
            other => Self::QueryError(other.to_string()),
        }
    }
}
