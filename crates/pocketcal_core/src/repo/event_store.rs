//! Blob-backed event store.
//!
//! # Responsibility
//! - Provide list/create/update/delete/query over the persisted event array.
//! - Distinguish "no data" from corrupt data and from failed writes.
//!
//! # Invariants
//! - Insertion order is preserved; `update` keeps an event's position.
//! - `update`/`delete` on an unknown id are silent no-ops.
//! - The store does not validate titles, dates, times or id uniqueness.
//!
//! # Concurrency
//! Read-modify-write is unlocked. Sharing one store across threads requires
//! an external mutex around each mutating call.

use crate::model::event::Event;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Logical key the event array is stored under unless configured otherwise.
pub const DEFAULT_EVENTS_KEY: &str = "calendar_events";

pub type StoreResult<T> = Result<T, StoreError>;

/// Event store failure. Corrupt blobs are not errors; see [`BlobStatus`].
#[derive(Debug)]
pub enum StoreError {
    /// Backend could not be read.
    Read(StorageError),
    /// Backend rejected the write; nothing was saved.
    Write(StorageError),
    /// Event collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read events: {err}"),
            Self::Write(err) => write!(f, "failed to save events: {err}"),
            Self::Encode(err) => write!(f, "failed to encode events: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

/// State of the persisted blob at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobStatus {
    /// Nothing stored under the key yet.
    Missing,
    Loaded,
    /// Blob exists but did not parse; the collection was treated as empty.
    Corrupt { reason: String },
}

/// Loaded collection plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSnapshot {
    pub events: Vec<Event>,
    pub status: BlobStatus,
}

impl EventSnapshot {
    /// Returns whether stored data was discarded because it was unreadable.
    pub fn was_reset(&self) -> bool {
        matches!(self.status, BlobStatus::Corrupt { .. })
    }
}

/// Event collection persisted as one JSON array under a fixed key.
pub struct EventStore<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Creates a store using [`DEFAULT_EVENTS_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_EVENTS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Releases the underlying backend.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Loads the collection and reports whether the blob was missing or corrupt.
    pub fn snapshot(&self) -> StoreResult<EventSnapshot> {
        let Some(blob) = self.storage.get(&self.key).map_err(StoreError::Read)? else {
            return Ok(EventSnapshot {
                events: Vec::new(),
                status: BlobStatus::Missing,
            });
        };

        match serde_json::from_str::<Vec<Event>>(&blob) {
            Ok(events) => Ok(EventSnapshot {
                events,
                status: BlobStatus::Loaded,
            }),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=corrupt key={} category={:?} line={} column={}",
                    self.key,
                    err.classify(),
                    err.line(),
                    err.column()
                );
                Ok(EventSnapshot {
                    events: Vec::new(),
                    status: BlobStatus::Corrupt {
                        reason: err.to_string(),
                    },
                })
            }
        }
    }

    /// Returns all events in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Event>> {
        Ok(self.snapshot()?.events)
    }

    /// Returns the event with `id`, if any.
    pub fn find(&self, id: &str) -> StoreResult<Option<Event>> {
        Ok(self.list()?.into_iter().find(|event| event.id == id))
    }

    /// Appends `event`. Id uniqueness is the caller's responsibility.
    pub fn create(&mut self, event: &Event) -> StoreResult<()> {
        let mut events = self.list()?;
        events.push(event.clone());
        self.save(&events)?;
        info!(
            "event=event_create module=store status=ok id={} total={}",
            event.id,
            events.len()
        );
        Ok(())
    }

    /// Replaces the first event with a matching id, keeping its position.
    ///
    /// Returns `false` without writing when no event matches.
    pub fn update(&mut self, event: &Event) -> StoreResult<bool> {
        let mut events = self.list()?;
        let Some(slot) = events.iter_mut().find(|existing| existing.id == event.id) else {
            debug!("event=event_update module=store status=skipped reason=not_found id={}", event.id);
            return Ok(false);
        };
        *slot = event.clone();
        self.save(&events)?;
        info!("event=event_update module=store status=ok id={}", event.id);
        Ok(true)
    }

    /// Removes the first event with `id`.
    ///
    /// Returns `false` without writing when no event matches.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut events = self.list()?;
        let Some(index) = events.iter().position(|event| event.id == id) else {
            debug!("event=event_delete module=store status=skipped reason=not_found id={id}");
            return Ok(false);
        };
        events.remove(index);
        self.save(&events)?;
        info!(
            "event=event_delete module=store status=ok id={id} total={}",
            events.len()
        );
        Ok(true)
    }

    /// Returns events whose date key equals `date` exactly.
    pub fn list_for_date(&self, date: &str) -> StoreResult<Vec<Event>> {
        let mut events = self.list()?;
        events.retain(|event| event.date == date);
        Ok(events)
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// The query is used verbatim; an empty query matches every event.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Event>> {
        let needle = query.to_lowercase();
        let mut events = self.list()?;
        events.retain(|event| event.matches_lowercase(&needle));
        Ok(events)
    }

    fn save(&mut self, events: &[Event]) -> StoreResult<()> {
        let blob = serde_json::to_string(events).map_err(StoreError::Encode)?;
        self.storage.set(&self.key, &blob).map_err(|err| {
            warn!(
                "event=store_save module=store status=error key={} bytes={} error={err}",
                self.key,
                blob.len()
            );
            StoreError::Write(err)
        })
    }
}
