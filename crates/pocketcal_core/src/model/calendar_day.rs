//! Month-grid cell view entity.

use super::event::Event;
use chrono::NaiveDate;

/// One cell of the 6x7 month grid.
///
/// Rebuilt from scratch on every navigation or mutation. `events` starts empty
/// and is filled by the caller (see `calendar::attach_events`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `false` for padding days borrowed from adjacent months.
    pub is_current_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, is_current_month: bool, is_today: bool) -> Self {
        Self {
            date,
            is_current_month,
            is_today,
            events: Vec::new(),
        }
    }
}
