mod challenge;
mod day_key;
mod habit;
mod ids;
mod stats;

pub use challenge::*;
pub use day_key::*;
pub use habit::*;
pub use ids::*;
pub use stats::*;
