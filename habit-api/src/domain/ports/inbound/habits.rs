use async_trait::async_trait;

use crate::domain::{
    models::{Category, DayCompletions, DayKey, Habit, HabitId, HabitStats, HabitUpdate, NewHabit},
    HabitError,
};

/// Inbound port for habit operations.
///
/// This trait defines the use cases that HTTP handlers can invoke.
/// Day-scoped operations always act on the service clock's "today".
#[async_trait]
pub trait HabitService: Send + Sync + 'static {
    /// Today's day key according to the service clock.
    fn today(&self) -> DayKey;

    // ========================================================================
    // Habit records
    // ========================================================================

    /// Create a habit with an empty history and a zero streak.
    async fn create_habit(&self, habit: NewHabit) -> Result<Habit, HabitError>;

    async fn get_habit(&self, id: HabitId) -> Result<Habit, HabitError>;

    /// List habits, newest first. `None` lists every category.
    async fn list_habits(&self, category: Option<Category>) -> Result<Vec<Habit>, HabitError>;

    /// Apply a partial update. Type, streak and logs cannot be changed here.
    async fn update_habit(&self, id: HabitId, update: HabitUpdate) -> Result<Habit, HabitError>;

    async fn delete_habit(&self, id: HabitId) -> Result<(), HabitError>;

    // ========================================================================
    // Day engines
    // ========================================================================

    /// Flip today's completion and move the streak by one.
    async fn toggle_today(&self, id: HabitId) -> Result<Habit, HabitError>;

    /// Record today's screen time in minutes, replacing any earlier value.
    async fn log_screen_time(&self, id: HabitId, minutes: i64) -> Result<Habit, HabitError>;

    // ========================================================================
    // Aggregations
    // ========================================================================

    async fn stats(&self) -> Result<HabitStats, HabitError>;

    /// Number of habits completed on `day`.
    async fn completions_on(&self, day: DayKey) -> Result<usize, HabitError>;

    /// Completion count for every day of a calendar month.
    async fn calendar_month(
        &self,
        year: i32,
        month: u8,
    ) -> Result<Vec<DayCompletions>, HabitError>;
}
