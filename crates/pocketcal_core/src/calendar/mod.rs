//! Month-grid generation and date-key helpers.
//!
//! # Responsibility
//! - Build the 42-cell month grid shown by the month view.
//! - Own the canonical `YYYY-MM-DD` date key used to join events onto days.
//!
//! # Invariants
//! - A grid always holds exactly `GRID_LENGTH` consecutive days starting on a Sunday.
//! - Date keys carry no time-of-day or timezone component.

mod clock;
mod grid;

pub use clock::{Clock, FixedClock, SystemClock};
pub use grid::{
    attach_events, build_month_grid, date_key, parse_date_key, DateKeyError, GridError,
    GridResult, MonthCursor, GRID_COLS, GRID_LENGTH, GRID_ROWS,
};
