mod challenges;
mod clock;
mod habits;

pub use challenges::*;
pub use clock::*;
pub use habits::*;
