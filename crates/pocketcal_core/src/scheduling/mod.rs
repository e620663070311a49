//! Pure scheduling predicates and orderings.
//!
//! # Responsibility
//! - Decide whether two same-day time ranges collide.
//! - Order a day's events chronologically.
//!
//! # Invariants
//! - No function here performs I/O or mutates its inputs.

mod rules;

pub use rules::{find_conflict, overlaps, sort_by_start_time};
