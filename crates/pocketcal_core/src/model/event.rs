//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical event record stored in the event blob.
//! - Provide id generation for newly created events.
//!
//! # Invariants
//! - `id` is unique across all persisted events (caller-guaranteed).
//! - `date` and time fields are stored verbatim; format checks happen at the
//!   input boundary, not here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque event identifier.
pub type EventId = String;

/// Categorical color tag for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Work,
    Personal,
    Other,
}

impl EventColor {
    /// Returns the wire value used in the persisted blob.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }

    /// Parses a wire value. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// One scheduled item on a single calendar day.
///
/// Serialized with camelCase field names (`startTime`, `endTime`) so the blob
/// matches the exported JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Date key in `YYYY-MM-DD` form.
    pub date: String,
    /// Zero-padded `HH:MM`, 24-hour clock.
    pub start_time: String,
    /// Zero-padded `HH:MM`, 24-hour clock.
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
}

impl Event {
    /// Builds an event from a draft and a freshly assigned id.
    pub fn from_draft(id: impl Into<EventId>, draft: EventDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
        }
    }

    /// Returns the editable fields of this event as a draft.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            color: self.color,
        }
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle_lower))
    }
}

/// User input for creating or editing an event, before an id exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub color: Option<EventColor>,
}

impl EventDraft {
    /// Creates a draft with the required fields set.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            color: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Source of unique ids for new events.
pub trait IdGenerator {
    fn generate(&self) -> EventId;
}

/// Random UUID v4 id source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> EventId {
        Uuid::new_v4().to_string()
    }
}
