use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc, RwLock,
    },
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Category, Habit, HabitId, NewHabit},
    ports::outbound::HabitRepository,
    HabitError,
};

/// Habit repository backed by an in-memory HashMap.
///
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryHabitRepository {
    habits: Arc<RwLock<HashMap<HabitId, Habit>>>,
    last_id: Arc<AtomicI32>,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<HabitId, Habit>> {
        self.habits.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<HabitId, Habit>> {
        self.habits.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn insert(
        &self,
        habit: &NewHabit,
        created_at: OffsetDateTime,
    ) -> Result<Habit, HabitError> {
        let id = HabitId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let habit = Habit::new(id, habit.clone(), created_at);

        self.write().insert(id, habit.clone());
        Ok(habit)
    }

    async fn get(&self, id: HabitId) -> Result<Option<Habit>, HabitError> {
        Ok(self.read().get(&id).cloned())
    }

    async fn list(&self, category: Option<Category>) -> Result<Vec<Habit>, HabitError> {
        let mut habits: Vec<Habit> = self
            .read()
            .values()
            .filter(|habit| category.is_none() || category == Some(habit.category))
            .cloned()
            .collect();

        habits.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(habits)
    }

    async fn save(&self, habit: &Habit) -> Result<(), HabitError> {
        let mut habits = self.write();
        match habits.get_mut(&habit.id) {
            Some(stored) => {
                *stored = habit.clone();
                Ok(())
            }
            None => Err(HabitError::NotFound(habit.id)),
        }
    }

    async fn delete(&self, id: HabitId) -> Result<bool, HabitError> {
        Ok(self.write().remove(&id).is_some())
    }
}
