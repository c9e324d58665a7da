//! Habit repository port (outbound).
//!
//! Defines the interface for persisting habit records together with their
//! completion and screen-time logs.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Category, Habit, HabitId, NewHabit},
    HabitError,
};

/// Outbound port for habit persistence.
///
/// Implementations store a habit and its day-indexed logs as one record:
/// `save` replaces all of it atomically.
#[async_trait]
pub trait HabitRepository: Send + Sync + 'static {
    /// Persist a new habit and return it with its assigned ID.
    async fn insert(
        &self,
        habit: &NewHabit,
        created_at: OffsetDateTime,
    ) -> Result<Habit, HabitError>;

    async fn get(&self, id: HabitId) -> Result<Option<Habit>, HabitError>;

    /// All habits, newest first, optionally restricted to one category.
    async fn list(&self, category: Option<Category>) -> Result<Vec<Habit>, HabitError>;

    /// Overwrite a stored habit, including its logs.
    ///
    /// Fails with `HabitError::NotFound` if the habit no longer exists.
    async fn save(&self, habit: &Habit) -> Result<(), HabitError>;

    /// Remove a habit. Returns `false` if there was nothing to remove.
    async fn delete(&self, id: HabitId) -> Result<bool, HabitError>;
}
