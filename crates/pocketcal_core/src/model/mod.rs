//! Calendar domain model.
//!
//! # Responsibility
//! - Define the persisted `Event` record and its wire shape.
//! - Define the transient `CalendarDay` view entity rebuilt per navigation.
//!
//! # Invariants
//! - `Event::id` is assigned once and never changes.
//! - `CalendarDay` values are derived and never persisted.

pub mod calendar_day;
pub mod event;
