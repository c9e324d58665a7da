use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Challenge, ChallengeId, NewChallenge},
    HabitError,
};

/// Outbound port for challenge persistence.
#[async_trait]
pub trait ChallengeRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Challenge>, HabitError>;

    async fn get(&self, id: ChallengeId) -> Result<Option<Challenge>, HabitError>;

    async fn insert(
        &self,
        challenge: &NewChallenge,
        created_at: OffsetDateTime,
    ) -> Result<Challenge, HabitError>;

    /// Drop every stored challenge and insert `challenges` in their place.
    async fn replace_all(
        &self,
        challenges: &[NewChallenge],
        created_at: OffsetDateTime,
    ) -> Result<Vec<Challenge>, HabitError>;
}
