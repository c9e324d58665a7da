#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use time::Duration;
use time::OffsetDateTime;

use crate::domain::models::{local_now, DayKey};

/// Source of "now" for the engines.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> OffsetDateTime;

    /// Calendar day `timestamp` falls on for this clock.
    fn day_of(&self, timestamp: OffsetDateTime) -> DayKey {
        DayKey::from_local(timestamp)
    }

    fn today(&self) -> DayKey {
        self.day_of(self.now())
    }
}

/// Wall clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        local_now()
    }
}

/// Manually driven clock. Days follow the offset of the stored timestamp.
#[cfg(test)]
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
}

#[cfg(test)]
#[allow(dead_code)]
impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn day_of(&self, timestamp: OffsetDateTime) -> DayKey {
        DayKey::of(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fixed_clock_advances_across_midnight() {
        let clock = FixedClock::new(datetime!(2026-10-18 23:30 +01:00));
        assert_eq!(clock.today().to_string(), "2026-10-18");

        clock.advance(Duration::hours(1));
        assert_eq!(clock.today().to_string(), "2026-10-19");

        clock.set(datetime!(2026-01-01 08:00 UTC));
        assert_eq!(clock.today().to_string(), "2026-01-01");
    }

    #[test]
    fn system_clock_today_is_local_date() {
        let clock = SystemClock;
        let before = DayKey::from_local(local_now());
        let today = clock.today();
        let after = DayKey::from_local(local_now());
        assert!(today == before || today == after);
    }
}
