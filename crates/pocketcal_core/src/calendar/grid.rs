//! Month grid builder.

use super::clock::Clock;
use crate::model::calendar_day::CalendarDay;
use crate::model::event::Event;
use crate::scheduling::sort_by_start_time;
use chrono::{Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const GRID_ROWS: usize = 6;
pub const GRID_COLS: usize = 7;
pub const GRID_LENGTH: usize = GRID_ROWS * GRID_COLS;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date key regex"));

pub type GridResult<T> = Result<T, GridError>;

/// Grid construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Normalized year falls outside the representable date range.
    OutOfRange { year: i32, month0: i32 },
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { year, month0 } => {
                write!(f, "month {month0} of year {year} is outside the supported date range")
            }
        }
    }
}

impl Error for GridError {}

/// Date key parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input is not shaped like `YYYY-MM-DD`.
    Malformed(String),
    /// Input is shaped correctly but names no real day (e.g. `2023-02-29`).
    NoSuchDate(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "date `{value}` is not in YYYY-MM-DD form"),
            Self::NoSuchDate(value) => write!(f, "date `{value}` does not exist"),
        }
    }
}

impl Error for DateKeyError {}

/// Builds the 42-day grid for `month0` (zero-based) of `year`.
///
/// Out-of-range months carry into adjacent years: `month0 = -1` is December of
/// `year - 1`, `month0 = 12` is January of `year + 1`.
///
/// # Invariants
/// - Result length is always `GRID_LENGTH`.
/// - Leading padding length equals the weekday (Sunday = 0) of the 1st.
/// - `events` is empty on every returned day.
pub fn build_month_grid(year: i32, month0: i32, clock: &impl Clock) -> GridResult<Vec<CalendarDay>> {
    let first = first_of_month(year, month0)?;
    let today = clock.today();
    let leading = u64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(leading))
        .ok_or(GridError::OutOfRange { year, month0 })?;

    let days = start
        .iter_days()
        .take(GRID_LENGTH)
        .map(|date| {
            let is_current_month = date.year() == first.year() && date.month() == first.month();
            CalendarDay::new(date, is_current_month, date == today)
        })
        .collect::<Vec<_>>();

    if days.len() != GRID_LENGTH {
        return Err(GridError::OutOfRange { year, month0 });
    }

    Ok(days)
}

/// Formats a date as its canonical `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a strict, zero-padded `YYYY-MM-DD` key.
pub fn parse_date_key(value: &str) -> Result<NaiveDate, DateKeyError> {
    if !DATE_KEY_RE.is_match(value) {
        return Err(DateKeyError::Malformed(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
        .map_err(|_| DateKeyError::NoSuchDate(value.to_string()))
}

/// Joins events onto grid days by date key.
///
/// Each day's list is replaced and sorted by start time. Events whose date
/// falls outside the grid are ignored.
pub fn attach_events(days: &mut [CalendarDay], events: &[Event]) {
    let mut by_date: HashMap<&str, Vec<Event>> = HashMap::new();
    for event in events {
        by_date
            .entry(event.date.as_str())
            .or_default()
            .push(event.clone());
    }

    for day in days.iter_mut() {
        day.events = by_date
            .get(date_key(day.date).as_str())
            .map(|matched| sort_by_start_time(matched))
            .unwrap_or_default();
    }
}

/// Month position used for previous/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    pub year: i32,
    /// Zero-based month, always within `0..=11`.
    pub month0: u32,
}

impl MonthCursor {
    /// Creates a cursor, normalizing `month0` into the year like the grid does.
    pub fn new(year: i32, month0: i32) -> Self {
        let (year, month0) = normalize_month(year, month0);
        Self { year, month0 }
    }

    /// Cursor for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }

    pub fn previous(self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    /// Returns whether `date` lies in this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    pub fn grid(self, clock: &impl Clock) -> GridResult<Vec<CalendarDay>> {
        build_month_grid(self.year, self.month0 as i32, clock)
    }
}

fn normalize_month(year: i32, month0: i32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month0);
    let normalized_year = total.div_euclid(12);
    let normalized_month0 = total.rem_euclid(12) as u32;
    let clamped_year = i32::try_from(normalized_year).unwrap_or(if normalized_year < 0 {
        i32::MIN
    } else {
        i32::MAX
    });
    (clamped_year, normalized_month0)
}

fn first_of_month(year: i32, month0: i32) -> GridResult<NaiveDate> {
    let (normalized_year, normalized_month0) = normalize_month(year, month0);
    NaiveDate::from_ymd_opt(normalized_year, normalized_month0 + 1, 1)
        .ok_or(GridError::OutOfRange { year, month0 })
}

#[cfg(test)]
mod tests {
    use super::normalize_month;

    #[test]
    fn normalize_month_carries_both_directions() {
        assert_eq!(normalize_month(2024, -1), (2023, 11));
        assert_eq!(normalize_month(2024, 12), (2025, 0));
        assert_eq!(normalize_month(2024, -13), (2022, 11));
        assert_eq!(normalize_month(2024, 25), (2026, 1));
    }
}
