#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No row with the requested id
    #[error("{0}")]
    NotFound(String),
    /// A write went through but its result broke an expected post-condition
    #[error("{0}")]
    InvariantViolation(String),
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
