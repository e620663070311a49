//! Core calendar logic for pocketcal.
//! This crate owns month-grid generation, overlap rules and event persistence.

pub mod calendar;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scheduling;
pub mod service;
pub mod storage;

pub use calendar::{
    attach_events, build_month_grid, date_key, parse_date_key, Clock, DateKeyError, FixedClock,
    GridError, MonthCursor, SystemClock, GRID_COLS, GRID_LENGTH,
};
pub use config::{AppConfig, ConfigError};
pub use export::{events_in_month, export_events, export_file_name, ExportError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::calendar_day::CalendarDay;
pub use model::event::{Event, EventColor, EventDraft, EventId, IdGenerator, UuidIdGenerator};
pub use repo::event_store::{
    BlobStatus, EventSnapshot, EventStore, StoreError, StoreResult, DEFAULT_EVENTS_KEY,
};
pub use scheduling::{find_conflict, overlaps, sort_by_start_time};
pub use service::calendar_service::{CalendarService, ServiceError, ServiceResult};
pub use service::validation::ValidationError;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
