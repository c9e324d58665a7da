mod challenge_repo;
mod habit_repo;
mod repo_error;

pub use challenge_repo::*;
pub use habit_repo::*;
pub use repo_error::RepositoryError;
