//! PostgreSQL implementation of the ChallengeRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Challenge, ChallengeId, NewChallenge},
    ports::outbound::ChallengeRepository,
    HabitError,
};
use crate::repositories::{
    ChallengeRecordRepository, ChallengeRecordRepositoryImpl, DatabaseChallenge,
    NewDatabaseChallenge, RepositoryError,
};

/// Adapter that implements ChallengeRepository using PostgreSQL.
pub struct PostgresChallengeAdapter<R = ChallengeRecordRepositoryImpl> {
    repo: Arc<R>,
}

impl<R> PostgresChallengeAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ChallengeRecordRepository + Send + Sync + 'static> ChallengeRepository
    for PostgresChallengeAdapter<R>
{
    async fn list(&self) -> Result<Vec<Challenge>, HabitError> {
        self.repo
            .list_challenges()
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|c| db_challenge_to_domain(c).map_err(storage_error))
            .collect()
    }

    async fn get(&self, id: ChallengeId) -> Result<Option<Challenge>, HabitError> {
        self.repo
            .get_challenge(id.as_i32())
            .await
            .map_err(storage_error)?
            .map(|c| db_challenge_to_domain(c).map_err(storage_error))
            .transpose()
    }

    async fn insert(
        &self,
        challenge: &NewChallenge,
        created_at: OffsetDateTime,
    ) -> Result<Challenge, HabitError> {
        let created = self
            .repo
            .create_challenge(&to_db_challenge(challenge, created_at))
            .await
            .map_err(storage_error)?;

        db_challenge_to_domain(created).map_err(storage_error)
    }

    async fn replace_all(
        &self,
        challenges: &[NewChallenge],
        created_at: OffsetDateTime,
    ) -> Result<Vec<Challenge>, HabitError> {
        let rows: Vec<_> = challenges
            .iter()
            .map(|c| to_db_challenge(c, created_at))
            .collect();

        self.repo
            .replace_challenges(&rows)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|c| db_challenge_to_domain(c).map_err(storage_error))
            .collect()
    }
}

fn storage_error(e: RepositoryError) -> HabitError {
    HabitError::storage(e.to_string())
}

fn to_db_challenge(challenge: &NewChallenge, created_at: OffsetDateTime) -> NewDatabaseChallenge {
    NewDatabaseChallenge {
        title: challenge.title.clone(),
        description: challenge.description.clone(),
        duration_days: i32::try_from(challenge.duration_days).unwrap_or(i32::MAX),
        habits: challenge.habits.clone(),
        challenge_type: challenge.kind.to_string(),
        created_at,
    }
}

fn db_challenge_to_domain(challenge: DatabaseChallenge) -> Result<Challenge, RepositoryError> {
    let id = challenge.id;
    let duration_days = u32::try_from(challenge.duration_days).map_err(|_| {
        RepositoryError::invalid_row(id, format!("invalid duration {}", challenge.duration_days))
    })?;
    let kind = challenge.challenge_type.parse().map_err(|_| {
        RepositoryError::invalid_row(
            id,
            format!("unknown challenge_type '{}'", challenge.challenge_type),
        )
    })?;

    Ok(Challenge {
        id: ChallengeId::new(id),
        title: challenge.title,
        description: challenge.description,
        duration_days,
        habits: challenge.habits,
        kind,
        created_at: challenge.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChallengeType;
    use time::macros::datetime;

    fn row(duration_days: i32, challenge_type: &str) -> DatabaseChallenge {
        DatabaseChallenge {
            id: 4,
            title: "Energy Boost".to_string(),
            description: Some("Two weeks of better sleep".to_string()),
            duration_days,
            habits: vec!["Drink water".to_string(), "Sleep early".to_string()],
            challenge_type: challenge_type.to_string(),
            created_at: datetime!(2026-10-18 09:00 UTC),
        }
    }

    #[test]
    fn new_challenge_round_trips_through_row() {
        let challenge = NewChallenge::new("Energy Boost", 14)
            .with_description("Two weeks of better sleep")
            .with_kind(ChallengeType::Energy)
            .with_habits(["Drink water", "Sleep early"]);

        let new_row = to_db_challenge(&challenge, datetime!(2026-10-18 09:00 UTC));
        assert_eq!(new_row.challenge_type, "energy");
        assert_eq!(new_row.duration_days, 14);

        let stored = DatabaseChallenge {
            id: 4,
            title: new_row.title,
            description: new_row.description,
            duration_days: new_row.duration_days,
            habits: new_row.habits,
            challenge_type: new_row.challenge_type,
            created_at: new_row.created_at,
        };
        let restored = db_challenge_to_domain(stored).unwrap();

        assert_eq!(restored.id, ChallengeId::new(4));
        assert_eq!(restored.title, challenge.title);
        assert_eq!(restored.description, challenge.description);
        assert_eq!(restored.duration_days, 14);
        assert_eq!(restored.habits, challenge.habits);
        assert_eq!(restored.kind, ChallengeType::Energy);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = db_challenge_to_domain(row(-3, "energy")).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRow { id: 4, .. }));
    }

    #[test]
    fn unknown_challenge_type_is_rejected() {
        let err = db_challenge_to_domain(row(14, "endurance")).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRow { id: 4, .. }));
    }
}
