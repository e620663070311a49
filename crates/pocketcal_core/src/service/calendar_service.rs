//! Calendar use-case service.
//!
//! # Responsibility
//! - Provide the entry points a presentation layer calls: month views,
//!   day lists, create/edit/reschedule/delete and month export.
//! - Run validation and overlap checks before every write.
//!
//! # Invariants
//! - Overlap checks only consider events on the target date.
//! - Missing ids on edit/reschedule/delete are reported as `None`/`false`,
//!   never as errors.

use crate::calendar::{attach_events, Clock, GridError, MonthCursor, SystemClock};
use crate::export::{events_in_month, export_events, ExportError};
use crate::model::calendar_day::CalendarDay;
use crate::model::event::{Event, EventDraft, IdGenerator, UuidIdGenerator};
use crate::repo::event_store::{BlobStatus, EventStore, StoreError};
use crate::scheduling::sort_by_start_time;
use crate::service::validation::{ensure_no_overlap, validate_draft, ValidationError};
use crate::storage::KeyValueStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected; nothing was written.
    Validation(ValidationError),
    Store(StoreError),
    Grid(GridError),
    Export(ExportError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Grid(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<GridError> for ServiceError {
    fn from(value: GridError) -> Self {
        Self::Grid(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Calendar facade over an event store, a clock and an id source.
pub struct CalendarService<S, C = SystemClock, G = UuidIdGenerator>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    store: EventStore<S>,
    clock: C,
    ids: G,
}

impl<S: KeyValueStore> CalendarService<S> {
    /// Creates a service using the system clock and UUID ids.
    pub fn with_defaults(store: EventStore<S>) -> Self {
        Self::new(store, SystemClock, UuidIdGenerator)
    }
}

impl<S, C, G> CalendarService<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(store: EventStore<S>, clock: C, ids: G) -> Self {
        Self { store, clock, ids }
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    /// Reports whether the persisted blob is missing, loaded or was reset.
    pub fn load_status(&self) -> ServiceResult<BlobStatus> {
        Ok(self.store.snapshot()?.status)
    }

    /// Builds the month grid with every stored event joined onto its day.
    pub fn month_view(&self, month: MonthCursor) -> ServiceResult<Vec<CalendarDay>> {
        let events = self.store.list()?;
        self.grid_with(month, &events)
    }

    /// Builds the month grid showing only events matching `query`.
    ///
    /// A blank query shows every event, like `month_view`.
    pub fn search_month_view(
        &self,
        month: MonthCursor,
        query: &str,
    ) -> ServiceResult<Vec<CalendarDay>> {
        let events = if query.trim().is_empty() {
            self.store.list()?
        } else {
            self.store.search(query)?
        };
        self.grid_with(month, &events)
    }

    /// Returns one day's events in start-time order.
    pub fn day_events(&self, date: &str) -> ServiceResult<Vec<Event>> {
        let events = self.store.list_for_date(date)?;
        Ok(sort_by_start_time(&events))
    }

    /// Validates `draft`, assigns a new id and persists it.
    pub fn create_event(&mut self, draft: EventDraft) -> ServiceResult<Event> {
        self.check_draft(&draft, None)?;
        let event = Event::from_draft(self.ids.generate(), draft);
        self.store.create(&event)?;
        Ok(event)
    }

    /// Replaces the editable fields of event `id`.
    ///
    /// Returns `Ok(None)` when no event has that id.
    pub fn update_event(&mut self, id: &str, draft: EventDraft) -> ServiceResult<Option<Event>> {
        if self.store.find(id)?.is_none() {
            return Ok(None);
        }
        self.check_draft(&draft, Some(id))?;
        let event = Event::from_draft(id, draft);
        self.store.update(&event)?;
        Ok(Some(event))
    }

    /// Moves event `id` to `new_date`, keeping its times.
    ///
    /// Same-date moves are a no-op that returns the unchanged event.
    pub fn reschedule_event(&mut self, id: &str, new_date: &str) -> ServiceResult<Option<Event>> {
        let Some(existing) = self.store.find(id)? else {
            return Ok(None);
        };
        if existing.date == new_date {
            return Ok(Some(existing));
        }

        let mut draft = existing.to_draft();
        draft.date = new_date.to_string();
        self.check_draft(&draft, Some(id))?;

        let moved = Event::from_draft(id, draft);
        self.store.update(&moved)?;
        info!("event=event_reschedule module=service status=ok id={id}");
        Ok(Some(moved))
    }

    /// Deletes event `id`. Returns `false` when it did not exist.
    pub fn delete_event(&mut self, id: &str) -> ServiceResult<bool> {
        Ok(self.store.delete(id)?)
    }

    /// Serializes the events dated inside `month` to export JSON.
    pub fn export_month(&self, month: MonthCursor) -> ServiceResult<String> {
        let events = events_in_month(&self.store.list()?, month);
        let json = export_events(&events)?;
        info!(
            "event=export_month module=service status=ok year={} month={} count={}",
            month.year,
            month.month0 + 1,
            events.len()
        );
        Ok(json)
    }

    fn grid_with(&self, month: MonthCursor, events: &[Event]) -> ServiceResult<Vec<CalendarDay>> {
        let mut days = month.grid(&self.clock)?;
        attach_events(&mut days, events);
        Ok(days)
    }

    fn check_draft(&self, draft: &EventDraft, ignore_id: Option<&str>) -> ServiceResult<()> {
        validate_draft(draft)?;
        let same_day = self.store.list_for_date(&draft.date)?;
        ensure_no_overlap(draft, &same_day, ignore_id)?;
        Ok(())
    }
}
