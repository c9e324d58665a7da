//! In-memory storage, used when no database is configured and in tests.

mod challenges;
mod habits;

pub use challenges::InMemoryChallengeRepository;
pub use habits::InMemoryHabitRepository;
