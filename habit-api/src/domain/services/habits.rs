use std::sync::Arc;

use async_trait::async_trait;

use super::locks::HabitLocks;
use crate::domain::{
    models::{
        completions_on, completions_per_day, Category, DayCompletions, DayKey, Habit, HabitId,
        HabitStats, HabitType, HabitUpdate, NewHabit, ToggleOutcome,
    },
    ports::{
        inbound::HabitService,
        outbound::{Clock, HabitRepository, SystemClock},
    },
    HabitError,
};

/// Implementation of the HabitService inbound port.
///
/// Owns the completion toggle and screen-time engines. Every
/// read-modify-write on a habit runs under that habit's lock, so two
/// concurrent toggles on the same habit can never lose an update.
pub struct HabitServiceImpl<R, C = SystemClock> {
    repository: Arc<R>,
    clock: Arc<C>,
    locks: HabitLocks,
}

impl<R, C> HabitServiceImpl<R, C> {
    pub fn with_clock(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            locks: HabitLocks::new(),
        }
    }
}

impl<R: HabitRepository, C: Clock> HabitServiceImpl<R, C> {
    async fn fetch(&self, id: HabitId) -> Result<Habit, HabitError> {
        self.repository
            .get(id)
            .await?
            .ok_or(HabitError::NotFound(id))
    }
}

fn validate_name(name: &str) -> Result<String, HabitError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HabitError::validation("name", "must not be empty"));
    }
    Ok(name.to_string())
}

fn validate_minutes(minutes: i64) -> Result<u32, HabitError> {
    i32::try_from(minutes)
        .ok()
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| HabitError::validation("minutes", "must be a non-negative integer"))
}

#[async_trait]
impl<R: HabitRepository, C: Clock> HabitService for HabitServiceImpl<R, C> {
    fn today(&self) -> DayKey {
        self.clock.today()
    }

    async fn create_habit(&self, mut habit: NewHabit) -> Result<Habit, HabitError> {
        habit.name = validate_name(&habit.name)?;

        let created = self.repository.insert(&habit, self.clock.now()).await?;
        tracing::info!(
            habit_id = %created.id,
            habit_type = %created.habit_type,
            "created habit '{}'",
            created.name
        );

        Ok(created)
    }

    async fn get_habit(&self, id: HabitId) -> Result<Habit, HabitError> {
        self.fetch(id).await
    }

    async fn list_habits(&self, category: Option<Category>) -> Result<Vec<Habit>, HabitError> {
        self.repository.list(category).await
    }

    async fn update_habit(
        &self,
        id: HabitId,
        mut update: HabitUpdate,
    ) -> Result<Habit, HabitError> {
        if let Some(name) = update.name.as_deref() {
            update.name = Some(validate_name(name)?);
        }

        let _guard = self.locks.lock(id).await;
        let mut habit = self.fetch(id).await?;
        habit.apply(update);
        self.repository.save(&habit).await?;

        tracing::debug!(habit_id = %id, "updated habit");
        Ok(habit)
    }

    async fn delete_habit(&self, id: HabitId) -> Result<(), HabitError> {
        let _guard = self.locks.lock(id).await;
        if !self.repository.delete(id).await? {
            return Err(HabitError::NotFound(id));
        }

        tracing::info!(habit_id = %id, "deleted habit");
        Ok(())
    }

    async fn toggle_today(&self, id: HabitId) -> Result<Habit, HabitError> {
        let _guard = self.locks.lock(id).await;
        let mut habit = self.fetch(id).await?;

        if habit.habit_type == HabitType::Timer {
            tracing::debug!(habit_id = %id, "toggling completion on a timer habit");
        }

        let now = self.clock.now();
        let today = self.clock.day_of(now);
        let outcome = habit.toggle_completion(today, now);
        self.repository.save(&habit).await?;

        match outcome {
            ToggleOutcome::Completed => {
                tracing::info!(habit_id = %id, %today, streak = habit.streak, "habit completed")
            }
            ToggleOutcome::Uncompleted => {
                tracing::info!(habit_id = %id, %today, streak = habit.streak, "habit un-completed")
            }
        }

        Ok(habit)
    }

    async fn log_screen_time(&self, id: HabitId, minutes: i64) -> Result<Habit, HabitError> {
        let minutes = validate_minutes(minutes)?;

        let _guard = self.locks.lock(id).await;
        let mut habit = self.fetch(id).await?;

        if habit.habit_type == HabitType::Checkbox {
            tracing::debug!(habit_id = %id, "logging screen time on a checkbox habit");
        }

        let today = self.clock.today();
        let previous = habit.log_screen_time(today, minutes);
        self.repository.save(&habit).await?;

        tracing::info!(
            habit_id = %id,
            %today,
            minutes,
            ?previous,
            over_goal = habit.is_over_goal(today),
            "logged screen time"
        );

        Ok(habit)
    }

    async fn stats(&self) -> Result<HabitStats, HabitError> {
        let habits = self.repository.list(None).await?;
        Ok(HabitStats::from_habits(&habits))
    }

    async fn completions_on(&self, day: DayKey) -> Result<usize, HabitError> {
        let habits = self.repository.list(None).await?;
        Ok(completions_on(&habits, day))
    }

    async fn calendar_month(
        &self,
        year: i32,
        month: u8,
    ) -> Result<Vec<DayCompletions>, HabitError> {
        let days = DayKey::days_of_month(year, month)
            .map_err(|e| HabitError::validation("month", e.to_string()))?;

        let habits = self.repository.list(None).await?;
        Ok(completions_per_day(&habits, &days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryHabitRepository;
    use crate::domain::ports::outbound::FixedClock;
    use time::{macros::datetime, Duration};

    fn service() -> (
        HabitServiceImpl<InMemoryHabitRepository, FixedClock>,
        Arc<FixedClock>,
    ) {
        let clock = Arc::new(FixedClock::new(datetime!(2026-10-18 09:00 UTC)));
        let service =
            HabitServiceImpl::with_clock(Arc::new(InMemoryHabitRepository::new()), clock.clone());
        (service, clock)
    }

    #[tokio::test]
    async fn read_habit_toggles_on_and_off() {
        let (service, _) = service();

        let habit = service
            .create_habit(NewHabit::new("Read").with_type(HabitType::Checkbox))
            .await
            .unwrap();
        assert_eq!(habit.streak, 0);

        let habit = service.toggle_today(habit.id).await.unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.completed_dates.len(), 1);
        assert!(habit.is_completed_on(service.today()));

        let habit = service.toggle_today(habit.id).await.unwrap();
        assert_eq!(habit.streak, 0);
        assert!(habit.completed_dates.is_empty());

        // Persisted, not just returned.
        let stored = service.get_habit(habit.id).await.unwrap();
        assert_eq!(stored, habit);
    }

    #[tokio::test]
    async fn instagram_goal_scenario() {
        let (service, _) = service();

        let habit = service
            .create_habit(NewHabit::new("Instagram").with_type(HabitType::Timer).with_goal(60))
            .await
            .unwrap();

        let habit = service.log_screen_time(habit.id, 40).await.unwrap();
        assert!(!habit.is_over_goal(service.today()));

        let habit = service.log_screen_time(habit.id, 90).await.unwrap();
        assert_eq!(habit.screen_time_log.len(), 1);
        assert_eq!(habit.minutes_on(service.today()), 90);
        assert!(habit.is_over_goal(service.today()));
    }

    #[tokio::test]
    async fn toggle_on_a_new_day_keeps_yesterday() {
        let (service, clock) = service();
        let habit = service.create_habit(NewHabit::new("Stretch")).await.unwrap();

        service.toggle_today(habit.id).await.unwrap();
        clock.advance(Duration::days(1));
        let habit = service.toggle_today(habit.id).await.unwrap();

        assert_eq!(habit.streak, 2);
        assert_eq!(habit.completed_dates.len(), 2);
    }

    #[tokio::test]
    async fn screen_time_on_a_new_day_adds_an_entry() {
        let (service, clock) = service();
        let habit = service
            .create_habit(NewHabit::new("YouTube").with_type(HabitType::Timer).with_goal(30))
            .await
            .unwrap();

        service.log_screen_time(habit.id, 45).await.unwrap();
        clock.advance(Duration::days(1));
        let habit = service.log_screen_time(habit.id, 10).await.unwrap();

        assert_eq!(habit.screen_time_log.len(), 2);
        assert!(!habit.is_over_goal(service.today()));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let (service, _) = service();

        let err = service.create_habit(NewHabit::new("   ")).await.unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "name", .. }));
    }

    #[tokio::test]
    async fn create_forces_goal_to_zero_for_checkbox() {
        let (service, _) = service();
        let habit = service
            .create_habit(NewHabit::new("Walk").with_goal(120))
            .await
            .unwrap();
        assert_eq!(habit.screen_time_goal, 0);
    }

    #[tokio::test]
    async fn log_rejects_negative_minutes() {
        let (service, _) = service();
        let habit = service
            .create_habit(NewHabit::new("TikTok").with_type(HabitType::Timer))
            .await
            .unwrap();

        let err = service.log_screen_time(habit.id, -5).await.unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "minutes", .. }));

        let err = service
            .log_screen_time(habit.id, i64::from(i32::MAX) + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::Validation { .. }));

        let habit = service.log_screen_time(habit.id, 0).await.unwrap();
        assert_eq!(habit.minutes_on(service.today()), 0);
        assert_eq!(habit.screen_time_log.len(), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (service, _) = service();
        let missing = HabitId::new(999);

        assert!(matches!(
            service.toggle_today(missing).await,
            Err(HabitError::NotFound(id)) if id == missing
        ));
        assert!(matches!(
            service.log_screen_time(missing, 10).await,
            Err(HabitError::NotFound(_))
        ));
        assert!(matches!(
            service.update_habit(missing, HabitUpdate::default()).await,
            Err(HabitError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_habit(missing).await,
            Err(HabitError::NotFound(_))
        ));
        assert!(matches!(
            service.get_habit(missing).await,
            Err(HabitError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let (service, _) = service();
        let habit = service.create_habit(NewHabit::new("Meditate")).await.unwrap();

        service.delete_habit(habit.id).await.unwrap();
        assert!(matches!(
            service.delete_habit(habit.id).await,
            Err(HabitError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_leaves_engine_state_alone() {
        let (service, _) = service();
        let habit = service.create_habit(NewHabit::new("Read")).await.unwrap();
        service.toggle_today(habit.id).await.unwrap();

        let updated = service
            .update_habit(
                habit.id,
                HabitUpdate {
                    name: Some("Read fiction".to_string()),
                    category: Some(Category::Mindfulness),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Read fiction");
        assert_eq!(updated.category, Category::Mindfulness);
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.completed_dates.len(), 1);
        assert_eq!(updated.habit_type, HabitType::Checkbox);
    }

    #[tokio::test]
    async fn update_rejects_blank_name() {
        let (service, _) = service();
        let habit = service.create_habit(NewHabit::new("Read")).await.unwrap();

        let err = service
            .update_habit(
                habit.id,
                HabitUpdate {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::Validation { field: "name", .. }));
        assert_eq!(service.get_habit(habit.id).await.unwrap().name, "Read");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_by_category() {
        let (service, clock) = service();

        service
            .create_habit(NewHabit::new("Run").with_category(Category::Health))
            .await
            .unwrap();
        clock.advance(Duration::minutes(1));
        service
            .create_habit(NewHabit::new("Journal").with_category(Category::Mindfulness))
            .await
            .unwrap();
        clock.advance(Duration::minutes(1));
        service
            .create_habit(NewHabit::new("Swim").with_category(Category::Health))
            .await
            .unwrap();

        let names: Vec<_> = service
            .list_habits(None)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, ["Swim", "Journal", "Run"]);

        let health: Vec<_> = service
            .list_habits(Some(Category::Health))
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(health, ["Swim", "Run"]);
    }

    #[tokio::test]
    async fn stats_and_calendar_follow_completions() {
        let (service, _) = service();
        assert_eq!(service.stats().await.unwrap(), HabitStats::default());

        let read = service.create_habit(NewHabit::new("Read")).await.unwrap();
        let run = service.create_habit(NewHabit::new("Run")).await.unwrap();
        service.toggle_today(read.id).await.unwrap();
        service.toggle_today(run.id).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_completions, 2);
        assert_eq!(stats.best_streak, 1);
        assert_eq!(stats.active_habits, 2);

        assert_eq!(service.completions_on(service.today()).await.unwrap(), 2);

        let october = service.calendar_month(2026, 10).await.unwrap();
        assert_eq!(october.len(), 31);
        assert_eq!(october[17].day, service.today());
        assert_eq!(october[17].completions, 2);
        assert_eq!(october.iter().map(|d| d.completions).sum::<usize>(), 2);

        assert!(matches!(
            service.calendar_month(2026, 13).await,
            Err(HabitError::Validation { field: "month", .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_toggles_are_serialized() {
        let (service, _) = service();
        let service = Arc::new(service);
        let id = service.create_habit(NewHabit::new("Read")).await.unwrap().id;

        let tasks: Vec<_> = (0..41)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.toggle_today(id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // An odd number of toggles from a clean start ends completed.
        let habit = service.get_habit(id).await.unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.completed_dates.len(), 1);
    }
}
