use chrono::{NaiveDate, Utc};

/// Source of "today" for stamping `applied_on`. Injected so tests can pin
/// the calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
