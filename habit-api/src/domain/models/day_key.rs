use std::{fmt, str::FromStr};

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, Month, OffsetDateTime, UtcOffset};

/// Canonical calendar-day key used for every "same day" comparison.
///
/// Completion dates and screen-time entries are indexed by this key, so a
/// habit can hold at most one of each per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(Date);

impl DayKey {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Day key of `timestamp` as seen on the server's local calendar.
    pub fn from_local(timestamp: OffsetDateTime) -> Self {
        Self(timestamp.to_offset(local_offset_at(timestamp)).date())
    }

    /// Day key of `timestamp` in its own offset, without any conversion.
    pub fn of(timestamp: OffsetDateTime) -> Self {
        Self(timestamp.date())
    }

    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Result<Self, time::error::ComponentRange> {
        let month = Month::try_from(month)?;
        Date::from_calendar_date(year, month, day).map(Self)
    }

    /// Every day of the given month, in order.
    pub fn days_of_month(year: i32, month: u8) -> Result<Vec<Self>, time::error::ComponentRange> {
        let month = Month::try_from(month)?;
        let first = Date::from_calendar_date(year, month, 1)?;
        let days = month.length(year);

        Ok((0..days)
            .filter_map(|offset| first.replace_day(offset + 1).ok())
            .map(Self)
            .collect())
    }

    pub fn date(&self) -> Date {
        self.0
    }
}

/// Local UTC offset in effect at `timestamp`, falling back to UTC.
fn local_offset_at(timestamp: OffsetDateTime) -> UtcOffset {
    chrono::Local
        .timestamp_opt(timestamp.unix_timestamp(), 0)
        .single()
        .and_then(|local| UtcOffset::from_whole_seconds(local.offset().local_minus_utc()).ok())
        .unwrap_or(UtcOffset::UTC)
}

/// Current time expressed in the server's local offset.
pub fn local_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.to_offset(local_offset_at(now))
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for DayKey {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, format_description!("[year]-[month]-[day]")).map(Self)
    }
}

impl TryFrom<String> for DayKey {
    type Error = time::error::Parse;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl From<Date> for DayKey {
    fn from(date: Date) -> Self {
        Self(date)
    }
}
