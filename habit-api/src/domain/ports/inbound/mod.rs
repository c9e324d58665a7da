mod challenges;
mod habits;

pub use challenges::*;
pub use habits::*;
