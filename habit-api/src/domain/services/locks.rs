use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::models::HabitId;

/// One async lock per habit ID.
///
/// Serializes read-modify-write cycles on a single habit while leaving
/// different habits free to proceed in parallel. Entries nobody holds or
/// waits on are dropped on the next acquisition.
#[derive(Debug, Default)]
pub struct HabitLocks {
    locks: Mutex<HashMap<HabitId, Arc<AsyncMutex<()>>>>,
}

impl HabitLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, id: HabitId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };

        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
