use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{default_challenges, Challenge, ChallengeId, Habit, NewChallenge},
    ports::{
        inbound::{ChallengeService, HabitService},
        outbound::{ChallengeRepository, Clock, SystemClock},
    },
    HabitError,
};

/// Implementation of the ChallengeService inbound port.
///
/// Joining a challenge goes through the habit service, one `create_habit`
/// call per listed habit name; challenges hold no state of their own.
pub struct ChallengeServiceImpl<R, H: ?Sized, C = SystemClock> {
    repository: Arc<R>,
    clock: Arc<C>,
    habits: Arc<H>,
}

impl<R, H: ?Sized, C> ChallengeServiceImpl<R, H, C> {
    pub fn new(repository: Arc<R>, habits: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            habits,
        }
    }
}

fn validate(challenge: &mut NewChallenge) -> Result<(), HabitError> {
    challenge.title = challenge.title.trim().to_string();
    if challenge.title.is_empty() {
        return Err(HabitError::validation("title", "must not be empty"));
    }
    if challenge.duration_days == 0 {
        return Err(HabitError::validation("duration", "must be at least one day"));
    }
    if challenge.habits.iter().any(|name| name.trim().is_empty()) {
        return Err(HabitError::validation("habits", "habit names must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl<R: ChallengeRepository, H: HabitService + ?Sized, C: Clock> ChallengeService
    for ChallengeServiceImpl<R, H, C>
{
    async fn list_challenges(&self) -> Result<Vec<Challenge>, HabitError> {
        self.repository.list().await
    }

    async fn create_challenge(&self, mut challenge: NewChallenge) -> Result<Challenge, HabitError> {
        validate(&mut challenge)?;

        let created = self
            .repository
            .insert(&challenge, self.clock.now())
            .await?;
        tracing::info!(challenge_id = %created.id, "created challenge '{}'", created.title);

        Ok(created)
    }

    async fn join_challenge(&self, id: ChallengeId) -> Result<Vec<Habit>, HabitError> {
        let challenge = self
            .repository
            .get(id)
            .await?
            .ok_or(HabitError::ChallengeNotFound(id))?;

        let mut created = Vec::with_capacity(challenge.habits.len());
        for template in challenge.habit_templates() {
            created.push(self.habits.create_habit(template).await?);
        }

        tracing::info!(
            challenge_id = %id,
            habits = created.len(),
            "joined challenge '{}'",
            challenge.title
        );
        Ok(created)
    }

    async fn seed_default_challenges(&self) -> Result<Vec<Challenge>, HabitError> {
        let seeded = self
            .repository
            .replace_all(&default_challenges(), self.clock.now())
            .await?;

        tracing::info!(count = seeded.len(), "seeded challenges");
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::{InMemoryChallengeRepository, InMemoryHabitRepository};
    use crate::domain::models::{Category, ChallengeType, HabitType};
    use crate::domain::ports::outbound::FixedClock;
    use crate::domain::services::HabitServiceImpl;
    use time::macros::datetime;

    type Habits = HabitServiceImpl<InMemoryHabitRepository, FixedClock>;

    struct Fixture {
        habits: Arc<Habits>,
        challenges: ChallengeServiceImpl<InMemoryChallengeRepository, Habits, FixedClock>,
        clock: Arc<FixedClock>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(FixedClock::new(datetime!(2026-10-18 09:00 +02:00)));
        let habits = Arc::new(HabitServiceImpl::with_clock(
            Arc::new(InMemoryHabitRepository::new()),
            clock.clone(),
        ));
        let challenges = ChallengeServiceImpl::new(
            Arc::new(InMemoryChallengeRepository::new()),
            habits.clone(),
            clock.clone(),
        );
        Fixture {
            habits,
            challenges,
            clock,
        }
    }

    #[tokio::test]
    async fn challenges_are_stamped_by_the_service_clock() {
        let Fixture {
            challenges, clock, ..
        } = fixture();

        let created = challenges
            .create_challenge(NewChallenge::new("Focus", 10))
            .await
            .unwrap();
        assert_eq!(created.created_at, datetime!(2026-10-18 09:00 +02:00));

        clock.set(datetime!(2026-10-20 07:30 +02:00));
        let seeded = challenges.seed_default_challenges().await.unwrap();
        assert!(seeded
            .iter()
            .all(|c| c.created_at == datetime!(2026-10-20 07:30 +02:00)));
    }

    #[tokio::test]
    async fn seeding_replaces_existing_challenges() {
        let Fixture { challenges, .. } = fixture();

        challenges
            .create_challenge(NewChallenge::new("Old", 7).with_habits(["Something"]))
            .await
            .unwrap();

        let seeded = challenges.seed_default_challenges().await.unwrap();
        assert_eq!(seeded.len(), 4);

        let listed = challenges.list_challenges().await.unwrap();
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().all(|c| c.title != "Old"));

        // Seeding twice does not duplicate.
        challenges.seed_default_challenges().await.unwrap();
        assert_eq!(challenges.list_challenges().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn joining_creates_one_habit_per_name() {
        let Fixture {
            habits, challenges, ..
        } = fixture();

        let challenge = challenges
            .create_challenge(
                NewChallenge::new("Calm Week", 7)
                    .with_kind(ChallengeType::Confidence)
                    .with_habits(["Breathe", "Journal", "Walk"]),
            )
            .await
            .unwrap();

        let created = challenges.join_challenge(challenge.id).await.unwrap();

        let names: Vec<_> = created.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Breathe", "Journal", "Walk"]);
        assert!(created.iter().all(|h| h.category == Category::Mindfulness
            && h.habit_type == HabitType::Checkbox
            && h.streak == 0
            && h.description.as_deref() == Some("Part of Calm Week")));

        assert_eq!(habits.list_habits(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn joining_unknown_challenge_fails() {
        let Fixture {
            habits, challenges, ..
        } = fixture();

        let err = challenges
            .join_challenge(ChallengeId::new(404))
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::ChallengeNotFound(_)));
        assert!(habits.list_habits(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let Fixture { challenges, .. } = fixture();

        let err = challenges
            .create_challenge(NewChallenge::new("  ", 30))
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "title", .. }));

        let err = challenges
            .create_challenge(NewChallenge::new("Zero", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "duration", .. }));

        let err = challenges
            .create_challenge(NewChallenge::new("Blank habit", 5).with_habits(["ok", " "]))
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "habits", .. }));
    }
}
