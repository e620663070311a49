//! Overlap and ordering rules over `HH:MM` time strings.

use crate::model::event::Event;

/// Returns whether `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// True when A starts inside B, A ends inside B, or A contains B. Abutting
/// ranges (`a_end == b_start`) do not overlap. Works on zero-padded `HH:MM`
/// strings because their lexicographic order is chronological.
pub fn overlaps<T: PartialOrd + ?Sized>(a_start: &T, a_end: &T, b_start: &T, b_end: &T) -> bool {
    let starts_inside = a_start >= b_start && a_start < b_end;
    let ends_inside = a_end > b_start && a_end <= b_end;
    let contains = a_start <= b_start && a_end >= b_end;
    starts_inside || ends_inside || contains
}

/// Returns a copy of `events` ordered by `start_time`, keeping the relative
/// order of equal start times.
pub fn sort_by_start_time(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    sorted
}

/// Finds the first event in `existing` whose time range overlaps the candidate.
///
/// `ignore_id` skips the event currently being edited so it cannot conflict
/// with its own previous version.
pub fn find_conflict<'a>(
    start_time: &str,
    end_time: &str,
    existing: &'a [Event],
    ignore_id: Option<&str>,
) -> Option<&'a Event> {
    existing
        .iter()
        .filter(|event| ignore_id != Some(event.id.as_str()))
        .find(|event| {
            overlaps(
                start_time,
                end_time,
                event.start_time.as_str(),
                event.end_time.as_str(),
            )
        })
}
