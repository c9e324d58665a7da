//! Read-only aggregations over a snapshot of habits.

use super::{DayKey, Habit};

/// Summary numbers for the progress page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HabitStats {
    pub total_completions: usize,
    pub best_streak: u32,
    pub active_habits: usize,
}

impl HabitStats {
    pub fn from_habits(habits: &[Habit]) -> Self {
        Self {
            total_completions: total_completions(habits),
            best_streak: best_streak(habits),
            active_habits: habits.len(),
        }
    }
}

/// Number of completions recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCompletions {
    pub day: DayKey,
    pub completions: usize,
}

/// Number of habits completed on `day`.
pub fn completions_on(habits: &[Habit], day: DayKey) -> usize {
    habits.iter().filter(|h| h.is_completed_on(day)).count()
}

pub fn total_completions(habits: &[Habit]) -> usize {
    habits.iter().map(|h| h.completed_dates.len()).sum()
}

/// Highest stored streak, 0 when there are no habits.
pub fn best_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.streak).max().unwrap_or(0)
}

/// Completion count for each day in `days`, in the same order.
pub fn completions_per_day(habits: &[Habit], days: &[DayKey]) -> Vec<DayCompletions> {
    days.iter()
        .map(|&day| DayCompletions {
            day,
            completions: completions_on(habits, day),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewHabit;
    use time::macros::{date, datetime};

    fn day(d: u8) -> DayKey {
        DayKey::from_calendar_date(2026, 10, d).unwrap()
    }

    fn habit(id: i32, streak: u32, days: &[u8]) -> Habit {
        Habit::new(id, NewHabit::new(format!("habit {id}")), datetime!(2026-10-01 00:00 UTC))
            .with_streak(streak)
            .with_completions(
                days.iter()
                    .map(|&d| (day(d), datetime!(2026-10-01 12:00 UTC))),
            )
    }

    #[test]
    fn empty_snapshot_aggregates_to_zero() {
        assert_eq!(best_streak(&[]), 0);
        assert_eq!(total_completions(&[]), 0);
        assert_eq!(completions_on(&[], day(1)), 0);
        assert_eq!(HabitStats::from_habits(&[]), HabitStats::default());
    }

    #[test]
    fn counts_across_habits() {
        let habits = vec![habit(1, 2, &[1, 2]), habit(2, 5, &[2]), habit(3, 0, &[])];

        assert_eq!(completions_on(&habits, day(2)), 2);
        assert_eq!(completions_on(&habits, day(1)), 1);
        assert_eq!(completions_on(&habits, day(3)), 0);
        assert_eq!(total_completions(&habits), 3);
        assert_eq!(best_streak(&habits), 5);

        let stats = HabitStats::from_habits(&habits);
        assert_eq!(stats.active_habits, 3);
    }

    #[test]
    fn per_day_counts_follow_requested_days() {
        let habits = vec![habit(1, 1, &[1]), habit(2, 1, &[1, 3])];
        let days = DayKey::days_of_month(2026, 10).unwrap();

        let counts = completions_per_day(&habits, &days);

        assert_eq!(counts.len(), 31);
        assert_eq!(counts[0].day.date(), date!(2026 - 10 - 01));
        assert_eq!(counts[0].completions, 2);
        assert_eq!(counts[1].completions, 0);
        assert_eq!(counts[2].completions, 1);
    }
}
