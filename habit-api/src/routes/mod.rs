pub(crate) mod challenges;
pub(crate) mod error;
pub(crate) mod habits;
pub(crate) mod stats;

pub(crate) use error::ApiError;
