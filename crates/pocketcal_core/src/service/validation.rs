//! Input-boundary checks for event drafts.
//!
//! # Responsibility
//! - Reject drafts before they reach the store: empty title, malformed
//!   date/time, inverted time range, same-day overlap.
//!
//! # Invariants
//! - Checks run in a fixed order and report only the first failure.
//! - Messages are human-readable and safe to show inline.

use crate::calendar::{parse_date_key, DateKeyError};
use crate::model::event::{Event, EventDraft, EventId};
use crate::scheduling::find_conflict;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// Reason a draft cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidDate(DateKeyError),
    InvalidTime { field: &'static str, value: String },
    EndNotAfterStart { start: String, end: String },
    Overlap { conflicting_id: EventId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::InvalidDate(err) => write!(f, "Invalid date: {err}"),
            Self::InvalidTime { field, value } => {
                write!(f, "Invalid {field} `{value}`: expected HH:MM (24-hour)")
            }
            Self::EndNotAfterStart { .. } => write!(f, "End time must be after start time"),
            Self::Overlap { .. } => write!(f, "Event overlaps with an existing event"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            _ => None,
        }
    }
}

/// Checks draft fields that do not depend on other events.
pub fn validate_draft(draft: &EventDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    parse_date_key(&draft.date).map_err(ValidationError::InvalidDate)?;
    validate_time("start time", &draft.start_time)?;
    validate_time("end time", &draft.end_time)?;
    if draft.start_time >= draft.end_time {
        return Err(ValidationError::EndNotAfterStart {
            start: draft.start_time.clone(),
            end: draft.end_time.clone(),
        });
    }
    Ok(())
}

/// Rejects the draft when it overlaps any of `same_day` except `ignore_id`.
pub fn ensure_no_overlap(
    draft: &EventDraft,
    same_day: &[Event],
    ignore_id: Option<&str>,
) -> Result<(), ValidationError> {
    match find_conflict(&draft.start_time, &draft.end_time, same_day, ignore_id) {
        Some(conflict) => Err(ValidationError::Overlap {
            conflicting_id: conflict.id.clone(),
        }),
        None => Ok(()),
    }
}

fn validate_time(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if TIME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
    }
}
