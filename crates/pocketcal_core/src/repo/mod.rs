//! Event persistence over the key-value port.
//!
//! # Responsibility
//! - Own the authoritative event collection stored as one JSON blob.
//! - Keep serialization details out of service callers.
//!
//! # Invariants
//! - Every mutation is a whole-collection read-modify-write.
//! - A blob that fails to parse reads as an empty collection.

pub mod event_store;
