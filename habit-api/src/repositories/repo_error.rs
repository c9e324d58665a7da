use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid row {id}: {reason}")]
    InvalidRow { id: i32, reason: String },
}

impl RepositoryError {
    pub fn invalid_row(id: i32, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            id,
            reason: reason.into(),
        }
    }
}
