//! # timetable-engine
//!
//! Deterministic timetable resolution for recurring classroom schedules.
//!
//! The engine maps recurring schedule definitions (course, lecturer, weekday
//! set, time range, validity window) onto a fixed grid of class periods and
//! resolves them against single-date exceptions (cancellations and one-off
//! replacements) to produce, for any calendar date, the authoritative
//! timetable behind downstream automation and UI rendering. All computation
//! is pure and synchronous: the caller provides the entry snapshot, the
//! engine never reads a clock or touches storage inside a resolution.
//!
//! ## Modules
//!
//! - [`normalize`] — time-of-day/date canonicalization and weekday codes
//! - [`catalog`] — the ordered, fixed table of class periods
//! - [`entry`] — schedule records and derived cell/span types
//! - [`view`] — the caller-owned working set of entries for one scope
//! - [`resolver`] — effective entry for a (date, period) pair, exception
//!   precedence over recurring definitions
//! - [`grid`] — week matrix construction with adjacent-period span merging
//! - [`decision`] — exception lifecycle (cancel/replace → persisted entry)
//! - [`store`] — the repository boundary trait and in-memory backend
//! - [`error`] — error types

pub mod catalog;
pub mod decision;
pub mod entry;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod resolver;
pub mod store;
pub mod view;

pub use catalog::{Period, PeriodCatalog};
pub use decision::{apply_decision, build_exception};
pub use entry::{
    CellKind, DecisionAction, ExceptionDecision, NewScheduleEntry, ResolvedCell, ScheduleEntry,
    SpanBlock, Weekday, CANCELED,
};
pub use error::TimetableError;
pub use grid::{build_week, GridCell, WeekGrid};
pub use normalize::{normalize, parse_date, parse_time, weekday_of};
pub use resolver::resolve_cell;
pub use store::{MemoryStore, ScheduleStore};
pub use view::{IngestError, ScheduleView};
