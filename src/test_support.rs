//! Shared helpers for unit tests.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(Mutex::new(instant))
    }

    /// Pins the clock to 09:00 UTC on the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .expect("valid fixed instant");
        Self::at(instant)
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.0.lock().expect("clock lock");
        *guard += by;
    }

    pub fn today(&self) -> NaiveDate {
        self.utc().date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

pub fn days_from(clock: &FixedClock, days: i64) -> NaiveDate {
    clock.today() + Duration::days(days)
}
