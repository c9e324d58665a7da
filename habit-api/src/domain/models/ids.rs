use serde::{Deserialize, Serialize};
use std::fmt;

/// A habit record identifier.
///
/// Wraps i32 to match the database SERIAL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(i32);

impl HabitId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for HabitId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<HabitId> for i32 {
    fn from(id: HabitId) -> Self {
        id.0
    }
}

/// A challenge identifier (database SERIAL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeId(i32);

impl ChallengeId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Extract the raw i32 value (consistent with `HabitId::as_i32()`).
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ChallengeId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
