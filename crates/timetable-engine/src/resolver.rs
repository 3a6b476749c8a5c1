//! Cell resolution: the single effective entry for a (date, period) pair.
//!
//! Pure computation over the entry snapshot the caller passes in — no
//! clock, no store access, no side effects. Safe to call on every UI
//! re-render.

use chrono::{NaiveDate, NaiveTime};

use crate::entry::{CellKind, ResolvedCell, ScheduleEntry};
use crate::normalize::weekday_of;

/// Default lower bound for entries with an open-ended validity window.
pub fn default_effective_from() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Default upper bound for entries with an open-ended validity window.
pub fn default_effective_to() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Determine the effective schedule entry for one date and period.
///
/// Matching proceeds in two passes over `entries`, both restricted to
/// entries whose `[start_time, end_time)` interval overlaps the half-open
/// period `[period_start, period_end)`:
///
/// 1. **Exception precedence** — an exception whose `effective_from` equals
///    `date` wins outright, regardless of any recurring entry's `enabled`
///    state. Returned with [`CellKind::Exception`].
/// 2. Otherwise the first recurring entry that is enabled, lists
///    `weekday_of(date)` in its weekday set, and whose inclusive
///    `[effective_from, effective_to]` window contains `date` (open bounds
///    default to 1900-01-01 / 2099-12-31). Returned with
///    [`CellKind::Regular`].
///
/// If neither pass matches, the cell is [`CellKind::Empty`].
///
/// `entries` are expected to be pre-scoped to one room by the
/// [`crate::view::ScheduleView`]. When several recurring entries match the
/// same slot — a data inconsistency the store does not prevent — the first
/// match in iteration order is picked; the pick is deterministic for a
/// given entry order but not otherwise specified.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use timetable_engine::entry::CellKind;
/// use timetable_engine::resolver::resolve_cell;
///
/// let entries: Vec<timetable_engine::ScheduleEntry> =
///     serde_json::from_value(serde_json::json!([{
///         "id": "e1",
///         "course_name": "Linear Algebra",
///         "start_time": "09:00",
///         "end_time": "11:00",
///         "weekdays": ["MON"],
///         "effective_from": "2024-01-01",
///         "effective_to": "2024-12-31",
///     }]))
///     .unwrap();
///
/// // 2024-03-04 is a Monday.
/// let cell = resolve_cell(
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
///     NaiveTime::from_hms_opt(10, 20, 0).unwrap(),
///     &entries,
/// );
/// assert_eq!(cell.kind, CellKind::Regular);
/// assert_eq!(cell.entry.unwrap().id, "e1");
/// ```
pub fn resolve_cell<'a>(
    date: NaiveDate,
    period_start: NaiveTime,
    period_end: NaiveTime,
    entries: &'a [ScheduleEntry],
) -> ResolvedCell<'a> {
    // Half-open overlap: [entry.start, entry.end) ∩ [period_start, period_end) ≠ ∅
    let overlaps =
        |e: &ScheduleEntry| e.start_time < period_end && e.end_time > period_start;

    // Pass 1: exceptions pinned to this exact date. Their weekday set and
    // enabled flag are not consulted.
    for entry in entries.iter().filter(|e| overlaps(e)) {
        if entry.is_exception && entry.effective_from == Some(date) {
            return ResolvedCell {
                entry: Some(entry),
                kind: CellKind::Exception,
            };
        }
    }

    // Pass 2: recurring entries.
    let weekday = weekday_of(date);
    for entry in entries.iter().filter(|e| overlaps(e)) {
        if entry.is_exception || !entry.enabled {
            continue;
        }
        if !entry.weekdays.contains(&weekday) {
            continue;
        }
        let from = entry.effective_from.unwrap_or_else(default_effective_from);
        let to = entry.effective_to.unwrap_or_else(default_effective_to);
        if from <= date && date <= to {
            return ResolvedCell {
                entry: Some(entry),
                kind: CellKind::Regular,
            };
        }
    }

    ResolvedCell::empty()
}

// ── Tests ───────────────────────────────────────────────────────────────────
