//! HTTP response types for habit, stats and challenge endpoints.
//!
//! These types serialize to the JSON format expected by the frontend.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{
    Category, Challenge, ChallengeId, ChallengeType, DayCompletions, DayKey, Frequency, Habit,
    HabitId, HabitStats, HabitType,
};

/// Timestamp serialized as an RFC 3339 string.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] pub OffsetDateTime);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenTimeEntryResponse {
    pub date: DayKey,
    pub minutes: u32,
}

/// Habit as seen by the frontend, including the fields derived from "today".
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: HabitId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub frequency: Frequency,
    pub category: Category,
    pub habit_type: HabitType,
    pub streak: u32,
    /// Completion instants, oldest day first.
    pub completed_dates: Vec<Timestamp>,
    pub screen_time_log: Vec<ScreenTimeEntryResponse>,
    pub screen_time_goal: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub completed_today: bool,
    pub today_minutes: u32,
    pub is_over_goal: bool,
}

impl HabitResponse {
    pub fn new(habit: Habit, today: DayKey) -> Self {
        let completed_today = habit.is_completed_on(today);
        let today_minutes = habit.minutes_on(today);
        let is_over_goal = habit.is_over_goal(today);

        Self {
            id: habit.id,
            name: habit.name,
            description: habit.description,
            icon: habit.icon,
            frequency: habit.frequency,
            category: habit.category,
            habit_type: habit.habit_type,
            streak: habit.streak,
            completed_dates: habit.completed_dates.into_values().map(Timestamp).collect(),
            screen_time_log: habit
                .screen_time_log
                .into_iter()
                .map(|(date, minutes)| ScreenTimeEntryResponse { date, minutes })
                .collect(),
            screen_time_goal: habit.screen_time_goal,
            created_at: habit.created_at,
            completed_today,
            today_minutes,
            is_over_goal,
        }
    }

    pub fn list(habits: Vec<Habit>, today: DayKey) -> Vec<Self> {
        habits.into_iter().map(|h| Self::new(h, today)).collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_completions: usize,
    pub best_streak: u32,
    pub active_habits: usize,
}

impl From<HabitStats> for StatsResponse {
    fn from(stats: HabitStats) -> Self {
        Self {
            total_completions: stats.total_completions,
            best_streak: stats.best_streak,
            active_habits: stats.active_habits,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCompletionsResponse {
    pub date: DayKey,
    pub completions: usize,
}

impl From<DayCompletions> for DayCompletionsResponse {
    fn from(day: DayCompletions) -> Self {
        Self {
            date: day.day,
            completions: day.completions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub id: ChallengeId,
    pub title: String,
    pub description: Option<String>,
    pub duration: u32,
    pub habits: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Challenge> for ChallengeResponse {
    fn from(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            description: challenge.description,
            duration: challenge.duration_days,
            habits: challenge.habits,
            kind: challenge.kind,
            created_at: challenge.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewHabit;
    use serde_json::json;
    use time::macros::{date, datetime};

    #[test]
    fn habit_serializes_camel_case_with_derived_fields() {
        let today = DayKey::new(date!(2026-10-18));
        let mut habit = Habit::new(
            7,
            NewHabit::new("Instagram")
                .with_category(Category::Screentime)
                .with_type(HabitType::Timer)
                .with_goal(60),
            datetime!(2026-10-01 08:00 UTC),
        );
        habit.log_screen_time(today, 90);

        let value = serde_json::to_value(HabitResponse::new(habit, today)).unwrap();

        assert_eq!(value["habitType"], json!("timer"));
        assert_eq!(value["category"], json!("screentime"));
        assert_eq!(value["screenTimeGoal"], json!(60));
        assert_eq!(value["screenTimeLog"], json!([{ "date": "2026-10-18", "minutes": 90 }]));
        assert_eq!(value["todayMinutes"], json!(90));
        assert_eq!(value["isOverGoal"], json!(true));
        assert_eq!(value["completedToday"], json!(false));
        assert_eq!(value["createdAt"], json!("2026-10-01T08:00:00Z"));
    }

    #[test]
    fn completed_dates_are_rfc3339() {
        let today = DayKey::new(date!(2026-10-18));
        let mut habit = Habit::new(1, NewHabit::new("Read"), datetime!(2026-10-01 08:00 UTC));
        habit.toggle_completion(today, datetime!(2026-10-18 09:15 UTC));

        let value = serde_json::to_value(HabitResponse::new(habit, today)).unwrap();

        assert_eq!(value["completedDates"], json!(["2026-10-18T09:15:00Z"]));
        assert_eq!(value["completedToday"], json!(true));
        assert_eq!(value["streak"], json!(1));
    }
}
