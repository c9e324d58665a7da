use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Challenge, ChallengeId, NewChallenge},
    ports::outbound::ChallengeRepository,
    HabitError,
};

#[derive(Default)]
struct State {
    challenges: Vec<Challenge>,
    last_id: i32,
}

impl State {
    fn push(&mut self, challenge: &NewChallenge, created_at: OffsetDateTime) -> Challenge {
        self.last_id += 1;
        let challenge = Challenge {
            id: ChallengeId::new(self.last_id),
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            duration_days: challenge.duration_days,
            habits: challenge.habits.clone(),
            kind: challenge.kind,
            created_at,
        };
        self.challenges.push(challenge.clone());
        challenge
    }
}

/// Challenge repository backed by an in-memory Vec, in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryChallengeRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryChallengeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeRepository for InMemoryChallengeRepository {
    async fn list(&self) -> Result<Vec<Challenge>, HabitError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.challenges.clone())
    }

    async fn get(&self, id: ChallengeId) -> Result<Option<Challenge>, HabitError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.challenges.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(
        &self,
        challenge: &NewChallenge,
        created_at: OffsetDateTime,
    ) -> Result<Challenge, HabitError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        Ok(state.push(challenge, created_at))
    }

    async fn replace_all(
        &self,
        challenges: &[NewChallenge],
        created_at: OffsetDateTime,
    ) -> Result<Vec<Challenge>, HabitError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.challenges.clear();

        Ok(challenges
            .iter()
            .map(|challenge| state.push(challenge, created_at))
            .collect())
    }
}
