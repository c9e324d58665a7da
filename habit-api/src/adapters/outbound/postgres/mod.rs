mod challenges;
mod habits;

pub use challenges::PostgresChallengeAdapter;
pub use habits::PostgresHabitAdapter;
