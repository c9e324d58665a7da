use thiserror::Error;

use super::models::{ChallengeId, HabitId};

/// Errors that can occur during habit and challenge operations.
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("habit not found: {0}")]
    NotFound(HabitId),
    #[error("challenge not found: {0}")]
    ChallengeNotFound(ChallengeId),
    /// The backing store is unavailable. Callers may retry.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl HabitError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
