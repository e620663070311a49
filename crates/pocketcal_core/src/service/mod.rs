//! Calendar use-case services.
//!
//! # Responsibility
//! - Validate user input before it reaches the event store.
//! - Assemble month views from the grid builder, store and scheduling rules.
//!
//! # Invariants
//! - No event is persisted without passing `validation`.

pub mod calendar_service;
pub mod validation;
