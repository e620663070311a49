//! Injectable "today" providers.

use chrono::{Local, NaiveDate};

/// Supplies the current local date for `is_today` flags.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the process-local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
