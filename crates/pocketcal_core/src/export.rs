//! JSON export of event subsets.
//!
//! Output uses the same array shape as the persisted blob, pretty-printed.

use crate::calendar::{parse_date_key, MonthCursor};
use crate::model::event::Event;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ExportError {
    Encode(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode export: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
        }
    }
}

/// Serializes `events` as a pretty-printed JSON array.
pub fn export_events(events: &[Event]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(events).map_err(ExportError::Encode)
}

/// Keeps events dated inside `month`, preserving order.
///
/// Events with an unparseable date key are skipped.
pub fn events_in_month(events: &[Event], month: MonthCursor) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            parse_date_key(&event.date)
                .map(|date| month.contains(date))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Download file name, e.g. `calendar-events-2024-3.json` for March 2024.
pub fn export_file_name(month: MonthCursor) -> String {
    format!("calendar-events-{}-{}.json", month.year, month.month0 + 1)
}
