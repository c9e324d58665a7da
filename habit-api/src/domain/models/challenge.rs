use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{Category, ChallengeId, Frequency, HabitType, NewHabit, DEFAULT_ICON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChallengeType {
    Confidence,
    Energy,
    #[default]
    Custom,
}

impl ChallengeType {
    /// Category given to habits created by joining a challenge of this type.
    pub fn habit_category(&self) -> Category {
        match self {
            ChallengeType::Confidence => Category::Mindfulness,
            ChallengeType::Energy => Category::Health,
            ChallengeType::Custom => Category::Custom,
        }
    }
}

/// A themed bundle of habit names that can be joined in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: Option<String>,
    pub duration_days: u32,
    pub habits: Vec<String>,
    pub kind: ChallengeType,
    pub created_at: OffsetDateTime,
}

impl Challenge {
    /// Habits to create when a user joins this challenge, in listed order.
    pub fn habit_templates(&self) -> Vec<NewHabit> {
        self.habits
            .iter()
            .map(|name| {
                NewHabit::new(name.as_str())
                    .with_description(format!("Part of {}", self.title))
                    .with_icon(DEFAULT_ICON)
                    .with_frequency(Frequency::Daily)
                    .with_category(self.kind.habit_category())
                    .with_type(HabitType::Checkbox)
            })
            .collect()
    }
}

/// Data for creating a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChallenge {
    pub title: String,
    pub description: Option<String>,
    pub duration_days: u32,
    pub habits: Vec<String>,
    pub kind: ChallengeType,
}

impl NewChallenge {
    pub fn new(title: impl Into<String>, duration_days: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            duration_days,
            habits: Vec::new(),
            kind: ChallengeType::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_habits<I, S>(mut self, habits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.habits = habits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: ChallengeType) -> Self {
        self.kind = kind;
        self
    }
}

/// The challenges every fresh installation starts with.
pub fn default_challenges() -> Vec<NewChallenge> {
    vec![
        NewChallenge::new("30-Day Self Confidence Booster", 30)
            .with_description(
                "Build unshakeable confidence through daily affirmations, journaling, and positive habits.",
            )
            .with_kind(ChallengeType::Confidence)
            .with_habits([
                "Morning affirmations (5 mins)",
                "Gratitude journaling",
                "Compliment yourself daily",
                "Try something new",
                "Practice power poses",
            ]),
        NewChallenge::new("45-Day Energy Boosting Morning Routine", 45)
            .with_description(
                "Transform your mornings and supercharge your energy levels for the entire day.",
            )
            .with_kind(ChallengeType::Energy)
            .with_habits([
                "Wake up at 6 AM",
                "Drink water (500ml)",
                "10-minute stretching",
                "Healthy breakfast",
                "No phone for first hour",
                "5-minute meditation",
            ]),
        NewChallenge::new("30-Day Digital Detox", 30)
            .with_description("Reduce screen time and reclaim your focus and mental clarity.")
            .with_habits([
                "No social media before 10 AM",
                "Phone usage under 2 hours",
                "Read physical book (20 mins)",
                "No screens 1 hour before bed",
                "Digital-free meals",
            ]),
        NewChallenge::new("21-Day Fitness Kickstart", 21)
            .with_description("Build a sustainable fitness routine and boost your physical health.")
            .with_habits([
                "30-minute workout",
                "10,000 steps daily",
                "Drink 8 glasses of water",
                "Protein-rich meal",
                "Stretch before bed",
            ]),
    ]
}
