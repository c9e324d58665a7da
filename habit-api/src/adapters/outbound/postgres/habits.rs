//! PostgreSQL implementation of the HabitRepository port.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools;
use time::OffsetDateTime;

use crate::domain::{
    models::{Category, DayKey, Habit, HabitId, NewHabit},
    ports::outbound::HabitRepository,
    HabitError,
};
use crate::repositories::{
    DatabaseCompletion, DatabaseHabit, DatabaseScreenTime, HabitRecordRepository,
    HabitRecordRepositoryImpl, NewDatabaseHabit, RepositoryError,
};

/// Adapter that implements HabitRepository using PostgreSQL.
///
/// Completion and screen time logs live in their own tables, one row per day.
pub struct PostgresHabitAdapter<R = HabitRecordRepositoryImpl> {
    repo: Arc<R>,
}

impl<R> PostgresHabitAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R: HabitRecordRepository + Send + Sync + 'static> PostgresHabitAdapter<R> {
    /// Load child rows for `habits` and assemble domain habits, keeping input order.
    async fn hydrate(&self, habits: Vec<DatabaseHabit>) -> Result<Vec<Habit>, HabitError> {
        if habits.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = habits.iter().map(|h| h.id).collect();
        let mut completions: HashMap<i32, Vec<DatabaseCompletion>> = self
            .repo
            .completions_for(&ids)
            .await
            .map_err(storage_error)?
            .into_iter()
            .into_group_map_by(|c| c.habit_id);
        let mut screen_time: HashMap<i32, Vec<DatabaseScreenTime>> = self
            .repo
            .screen_time_for(&ids)
            .await
            .map_err(storage_error)?
            .into_iter()
            .into_group_map_by(|s| s.habit_id);

        habits
            .into_iter()
            .map(|habit| {
                let id = habit.id;
                db_habit_to_domain(
                    habit,
                    completions.remove(&id).unwrap_or_default(),
                    screen_time.remove(&id).unwrap_or_default(),
                )
                .map_err(storage_error)
            })
            .collect()
    }
}

#[async_trait]
impl<R: HabitRecordRepository + Send + Sync + 'static> HabitRepository
    for PostgresHabitAdapter<R>
{
    async fn insert(
        &self,
        habit: &NewHabit,
        created_at: OffsetDateTime,
    ) -> Result<Habit, HabitError> {
        let new_habit = NewDatabaseHabit {
            name: habit.name.clone(),
            description: habit.description.clone(),
            icon: habit.icon.clone(),
            frequency: habit.frequency.to_string(),
            category: habit.category.to_string(),
            habit_type: habit.habit_type.to_string(),
            screen_time_goal: to_db_int(habit.effective_goal()),
            created_at,
        };

        let created = self
            .repo
            .create_habit(&new_habit)
            .await
            .map_err(storage_error)?;

        db_habit_to_domain(created, Vec::new(), Vec::new()).map_err(storage_error)
    }

    async fn get(&self, id: HabitId) -> Result<Option<Habit>, HabitError> {
        let Some(habit) = self
            .repo
            .get_habit(id.as_i32())
            .await
            .map_err(storage_error)?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![habit]).await?.pop())
    }

    async fn list(&self, category: Option<Category>) -> Result<Vec<Habit>, HabitError> {
        let category = category.map(|c| c.to_string());
        let habits = self
            .repo
            .list_habits(category.as_deref())
            .await
            .map_err(storage_error)?;

        self.hydrate(habits).await
    }

    async fn save(&self, habit: &Habit) -> Result<(), HabitError> {
        let (record, completions, screen_time) = domain_to_db_habit(habit);

        self.repo
            .save_habit(&record, &completions, &screen_time)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => HabitError::NotFound(habit.id),
                other => storage_error(other),
            })
    }

    async fn delete(&self, id: HabitId) -> Result<bool, HabitError> {
        self.repo
            .delete_habit(id.as_i32())
            .await
            .map_err(storage_error)
    }
}

fn storage_error(e: RepositoryError) -> HabitError {
    HabitError::storage(e.to_string())
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn parse_column<T: FromStr>(id: i32, column: &str, value: &str) -> Result<T, RepositoryError> {
    value
        .parse()
        .map_err(|_| RepositoryError::invalid_row(id, format!("unknown {column} '{value}'")))
}

fn non_negative(id: i32, column: &str, value: i32) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::invalid_row(id, format!("negative {column} {value}")))
}

/// Convert database rows to a domain Habit.
fn db_habit_to_domain(
    habit: DatabaseHabit,
    completions: Vec<DatabaseCompletion>,
    screen_time: Vec<DatabaseScreenTime>,
) -> Result<Habit, RepositoryError> {
    let id = habit.id;
    let screen_time = screen_time
        .into_iter()
        .map(|entry| Ok((DayKey::new(entry.day), non_negative(id, "minutes", entry.minutes)?)))
        .collect::<Result<Vec<_>, RepositoryError>>()?;

    Ok(Habit {
        id: HabitId::new(id),
        name: habit.name,
        description: habit.description,
        icon: habit.icon,
        frequency: parse_column(id, "frequency", &habit.frequency)?,
        category: parse_column(id, "category", &habit.category)?,
        habit_type: parse_column(id, "habit_type", &habit.habit_type)?,
        streak: non_negative(id, "streak", habit.streak)?,
        completed_dates: Default::default(),
        screen_time_log: Default::default(),
        screen_time_goal: non_negative(id, "screen_time_goal", habit.screen_time_goal)?,
        created_at: habit.created_at,
    }
    .with_completions(
        completions
            .into_iter()
            .map(|c| (DayKey::new(c.day), c.completed_at)),
    )
    .with_screen_time(screen_time))
}

/// Convert a domain Habit to its database rows.
fn domain_to_db_habit(
    habit: &Habit,
) -> (DatabaseHabit, Vec<DatabaseCompletion>, Vec<DatabaseScreenTime>) {
    let id = habit.id.as_i32();
    let record = DatabaseHabit {
        id,
        name: habit.name.clone(),
        description: habit.description.clone(),
        icon: habit.icon.clone(),
        frequency: habit.frequency.to_string(),
        category: habit.category.to_string(),
        habit_type: habit.habit_type.to_string(),
        streak: to_db_int(habit.streak),
        screen_time_goal: to_db_int(habit.screen_time_goal),
        created_at: habit.created_at,
    };

    let completions = habit
        .completed_dates
        .iter()
        .map(|(day, completed_at)| DatabaseCompletion {
            habit_id: id,
            day: day.date(),
            completed_at: *completed_at,
        })
        .collect();

    let screen_time = habit
        .screen_time_log
        .iter()
        .map(|(day, minutes)| DatabaseScreenTime {
            habit_id: id,
            day: day.date(),
            minutes: to_db_int(*minutes),
        })
        .collect();

    (record, completions, screen_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Frequency, HabitType};
    use time::macros::{date, datetime};

    fn row(category: &str) -> DatabaseHabit {
        DatabaseHabit {
            id: 7,
            name: "Read".to_string(),
            description: None,
            icon: "Book".to_string(),
            frequency: "weekly".to_string(),
            category: category.to_string(),
            habit_type: "timer".to_string(),
            streak: 3,
            screen_time_goal: 45,
            created_at: datetime!(2026-10-01 08:00 UTC),
        }
    }

    #[test]
    fn rows_convert_to_domain_habit() {
        let completions = vec![DatabaseCompletion {
            habit_id: 7,
            day: date!(2026-10-17),
            completed_at: datetime!(2026-10-17 21:00 UTC),
        }];
        let screen_time = vec![DatabaseScreenTime {
            habit_id: 7,
            day: date!(2026-10-18),
            minutes: 50,
        }];

        let habit = db_habit_to_domain(row("screentime"), completions, screen_time).unwrap();

        assert_eq!(habit.id, HabitId::new(7));
        assert_eq!(habit.frequency, Frequency::Weekly);
        assert_eq!(habit.category, Category::Screentime);
        assert_eq!(habit.habit_type, HabitType::Timer);
        assert_eq!(habit.streak, 3);
        assert!(habit.is_completed_on(DayKey::new(date!(2026-10-17))));
        assert_eq!(habit.minutes_on(DayKey::new(date!(2026-10-18))), 50);
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = db_habit_to_domain(row("hobbies"), Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRow { id: 7, .. }));
    }

    #[test]
    fn domain_habit_round_trips_through_rows() {
        let habit = db_habit_to_domain(
            row("health"),
            vec![DatabaseCompletion {
                habit_id: 7,
                day: date!(2026-10-16),
                completed_at: datetime!(2026-10-16 07:30 UTC),
            }],
            Vec::new(),
        )
        .unwrap();

        let (record, completions, screen_time) = domain_to_db_habit(&habit);
        let restored = db_habit_to_domain(record, completions, screen_time).unwrap();

        assert_eq!(restored, habit);
    }
}
