use async_trait::async_trait;

use crate::domain::{
    models::{Challenge, ChallengeId, Habit, NewChallenge},
    HabitError,
};

/// Inbound port for challenge operations.
#[async_trait]
pub trait ChallengeService: Send + Sync + 'static {
    async fn list_challenges(&self) -> Result<Vec<Challenge>, HabitError>;

    async fn create_challenge(&self, challenge: NewChallenge) -> Result<Challenge, HabitError>;

    /// Create one habit per habit name listed by the challenge.
    ///
    /// Returns the created habits in listed order.
    async fn join_challenge(&self, id: ChallengeId) -> Result<Vec<Habit>, HabitError>;

    /// Replace all stored challenges with the built-in set.
    async fn seed_default_challenges(&self) -> Result<Vec<Challenge>, HabitError>;
}
