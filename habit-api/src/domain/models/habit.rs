use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{DayKey, HabitId};

pub const DEFAULT_ICON: &str = "CheckCircle";

/// How often a habit is meant to be done. Recorded, never scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Health,
    Productivity,
    Mindfulness,
    Social,
    Screentime,
    #[default]
    Custom,
}

/// Which engine applies to a habit: day toggles or screen-time minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HabitType {
    #[default]
    Checkbox,
    Timer,
}

/// Outcome of a toggle, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Completed,
    Uncompleted,
}

/// A tracked habit with its day-indexed logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub frequency: Frequency,
    pub category: Category,
    pub habit_type: HabitType,
    /// Toggle-on events minus toggle-off events, floored at zero. Not a
    /// consecutive-day streak: gaps between completions never reset it.
    pub streak: u32,
    /// Completion timestamp per day.
    pub completed_dates: BTreeMap<DayKey, OffsetDateTime>,
    /// Minutes spent per day.
    pub screen_time_log: BTreeMap<DayKey, u32>,
    /// Daily limit in minutes, 0 when unset. Always 0 for checkbox habits.
    pub screen_time_goal: u32,
    pub created_at: OffsetDateTime,
}

impl Habit {
    pub fn new(id: impl Into<HabitId>, new_habit: NewHabit, created_at: OffsetDateTime) -> Self {
        let screen_time_goal = new_habit.effective_goal();

        Self {
            id: id.into(),
            name: new_habit.name,
            description: new_habit.description,
            icon: new_habit.icon,
            frequency: new_habit.frequency,
            category: new_habit.category,
            habit_type: new_habit.habit_type,
            streak: 0,
            completed_dates: BTreeMap::new(),
            screen_time_log: BTreeMap::new(),
            screen_time_goal,
            created_at,
        }
    }

    #[cfg(test)]
    pub fn with_streak(mut self, streak: u32) -> Self {
        self.streak = streak;
        self
    }

    pub fn with_completions(
        mut self,
        completions: impl IntoIterator<Item = (DayKey, OffsetDateTime)>,
    ) -> Self {
        self.completed_dates = completions.into_iter().collect();
        self
    }

    pub fn with_screen_time(mut self, entries: impl IntoIterator<Item = (DayKey, u32)>) -> Self {
        self.screen_time_log = entries.into_iter().collect();
        self
    }

    pub fn is_completed_on(&self, day: DayKey) -> bool {
        self.completed_dates.contains_key(&day)
    }

    /// Flip the completion state of `today`.
    ///
    /// Completing increments the streak, un-completing decrements it
    /// (never below zero).
    pub fn toggle_completion(&mut self, today: DayKey, now: OffsetDateTime) -> ToggleOutcome {
        if self.completed_dates.remove(&today).is_some() {
            self.streak = self.streak.saturating_sub(1);
            ToggleOutcome::Uncompleted
        } else {
            self.completed_dates.insert(today, now);
            self.streak = self.streak.saturating_add(1);
            ToggleOutcome::Completed
        }
    }

    /// Record the minutes spent `today`, replacing any earlier value for the day.
    ///
    /// Returns the previous value, if any.
    pub fn log_screen_time(&mut self, today: DayKey, minutes: u32) -> Option<u32> {
        self.screen_time_log.insert(today, minutes)
    }

    pub fn minutes_on(&self, day: DayKey) -> u32 {
        self.screen_time_log.get(&day).copied().unwrap_or(0)
    }

    /// Timer habits only; strictly greater than the goal.
    pub fn is_over_goal(&self, today: DayKey) -> bool {
        self.habit_type == HabitType::Timer && self.minutes_on(today) > self.screen_time_goal
    }

    /// Apply the fields present in `update`; absent fields are left alone.
    pub fn apply(&mut self, update: HabitUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(goal) = update.screen_time_goal {
            self.screen_time_goal = effective_goal(self.habit_type, goal);
        }
    }
}

fn effective_goal(habit_type: HabitType, goal: u32) -> u32 {
    match habit_type {
        HabitType::Timer => goal,
        HabitType::Checkbox => 0,
    }
}

/// Fields for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub frequency: Frequency,
    pub category: Category,
    pub habit_type: HabitType,
    pub screen_time_goal: u32,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            icon: DEFAULT_ICON.to_string(),
            frequency: Frequency::default(),
            category: Category::default(),
            habit_type: HabitType::default(),
            screen_time_goal: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_type(mut self, habit_type: HabitType) -> Self {
        self.habit_type = habit_type;
        self
    }

    pub fn with_goal(mut self, minutes: u32) -> Self {
        self.screen_time_goal = minutes;
        self
    }

    /// The goal that will actually be stored: zero unless this is a timer habit.
    pub fn effective_goal(&self) -> u32 {
        effective_goal(self.habit_type, self.screen_time_goal)
    }
}

/// Partial update of a habit.
///
/// `None` means "not supplied". For `description`, `Some(None)` clears it
/// and `Some(Some(""))` sets it to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub screen_time_goal: Option<u32>,
}
