mod challenges;
mod habits;
mod locks;

pub use challenges::ChallengeServiceImpl;
pub use habits::HabitServiceImpl;
