//! Exception lifecycle: turning a cancel/replace decision into a persisted
//! single-date exception entry.
//!
//! The constructed exception copies the target's room and time range, pins
//! itself to exactly one date (`effective_from == effective_to`), and takes
//! precedence over the recurring definition for that date only — the
//! recurring entry is never mutated or disabled. Uniqueness per
//! (room, date, time range) is a convention enforced by construction, not a
//! check against existing data; if two conflicting exceptions are persisted
//! the resolver's deterministic first-match governs display.

use std::collections::BTreeSet;

use crate::entry::{DecisionAction, ExceptionDecision, NewScheduleEntry, ScheduleEntry, CANCELED};
use crate::error::{Result, TimetableError};
use crate::normalize::weekday_of;
use crate::store::ScheduleStore;

/// Construct the exception entry a decision describes, without persisting it.
///
/// Validation happens here, before any store write is attempted.
///
/// # Errors
///
/// Returns [`TimetableError::InvalidDecision`] for a replace decision whose
/// course name or lecturer is blank.
pub fn build_exception(decision: &ExceptionDecision) -> Result<NewScheduleEntry> {
    let (course_name, lecturer) = match &decision.action {
        DecisionAction::Cancel => (CANCELED.to_string(), String::new()),
        DecisionAction::Replace {
            course_name,
            lecturer,
        } => {
            if course_name.trim().is_empty() {
                return Err(TimetableError::InvalidDecision(
                    "replace decision requires a course name".to_string(),
                ));
            }
            if lecturer.trim().is_empty() {
                return Err(TimetableError::InvalidDecision(
                    "replace decision requires a lecturer".to_string(),
                ));
            }
            (course_name.clone(), lecturer.clone())
        }
    };

    Ok(NewScheduleEntry {
        room_id: decision.target.room_id.clone(),
        course_name,
        lecturer,
        start_time: decision.target.start_time,
        end_time: decision.target.end_time,
        weekdays: BTreeSet::from([weekday_of(decision.date)]),
        effective_from: Some(decision.date),
        effective_to: Some(decision.date),
        is_exception: true,
        enabled: true,
    })
}

/// Validate a decision, persist the resulting exception, and return the
/// stored entry (with its store-assigned id).
///
/// The caller merges the returned entry into its
/// [`crate::view::ScheduleView`] so the next grid build reflects it.
///
/// # Errors
///
/// Returns [`TimetableError::InvalidDecision`] before any persistence
/// attempt, or [`TimetableError::Repository`] if the store write fails.
pub fn apply_decision(
    store: &mut impl ScheduleStore,
    decision: &ExceptionDecision,
) -> Result<ScheduleEntry> {
    let entry = build_exception(decision)?;
    store.create_entry(entry)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CellKind, Weekday};
    use crate::resolver::resolve_cell;
    use crate::store::MemoryStore;
    use crate::view::ScheduleView;
    use chrono::{NaiveDate, NaiveTime};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn target() -> ScheduleEntry {
        serde_json::from_value(serde_json::json!({
            "id": "e1",
            "room_id": "r101",
            "course_name": "Linear Algebra",
            "lecturer": "Dr. Osei",
            "start_time": "09:00:00",
            "end_time": "11:00:00",
            "weekdays": ["MON"],
            "effective_from": "2024-01-01",
            "effective_to": "2024-12-31",
        }))
        .unwrap()
    }

    #[test]
    fn test_cancel_builds_single_date_exception() {
        let decision = ExceptionDecision {
            action: DecisionAction::Cancel,
            target: target(),
            date: d(2024, 3, 11),
        };
        let entry = build_exception(&decision).unwrap();

        assert_eq!(entry.course_name, CANCELED);
        assert!(entry.lecturer.is_empty());
        assert!(entry.is_exception);
        assert_eq!(entry.effective_from, Some(d(2024, 3, 11)));
        assert_eq!(entry.effective_to, Some(d(2024, 3, 11)));
        assert_eq!(entry.room_id.as_deref(), Some("r101"));
        assert_eq!(entry.start_time, t(9, 0));
        assert_eq!(entry.end_time, t(11, 0));
        assert!(entry.weekdays.contains(&Weekday::Mon));
    }

    #[test]
    fn test_replace_carries_replacement_fields() {
        let decision = ExceptionDecision {
            action: DecisionAction::Replace {
                course_name: "Guest Lecture".to_string(),
                lecturer: "Prof. Imai".to_string(),
            },
            target: target(),
            date: d(2024, 3, 11),
        };
        let entry = build_exception(&decision).unwrap();
        assert_eq!(entry.course_name, "Guest Lecture");
        assert_eq!(entry.lecturer, "Prof. Imai");
        assert!(entry.is_exception);
    }

    #[test]
    fn test_replace_rejects_blank_fields_before_persistence() {
        let mut store = MemoryStore::new();
        let decision = ExceptionDecision {
            action: DecisionAction::Replace {
                course_name: "  ".to_string(),
                lecturer: "Prof. Imai".to_string(),
            },
            target: target(),
            date: d(2024, 3, 11),
        };
        let err = apply_decision(&mut store, &decision).unwrap_err().to_string();
        assert!(err.contains("Invalid decision"), "got: {err}");
        assert!(store.is_empty(), "nothing may be persisted on rejection");

        let decision = ExceptionDecision {
            action: DecisionAction::Replace {
                course_name: "Guest Lecture".to_string(),
                lecturer: String::new(),
            },
            target: target(),
            date: d(2024, 3, 11),
        };
        assert!(apply_decision(&mut store, &decision).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_lifecycle_end_to_end() {
        let mut store = MemoryStore::with_entries(vec![target()]);
        let mut view = ScheduleView::from_store(&store, Some("r101")).unwrap();

        // Before the decision the recurring entry resolves on 2024-03-11.
        let before = resolve_cell(d(2024, 3, 11), t(9, 30), t(10, 20), view.entries());
        assert_eq!(before.kind, CellKind::Regular);

        let decision = ExceptionDecision {
            action: DecisionAction::Cancel,
            target: target(),
            date: d(2024, 3, 11),
        };
        let stored = apply_decision(&mut store, &decision).unwrap();
        assert_eq!(stored.id, "mem-1");
        view.append(stored);

        // The exception now wins for its exact date...
        let after = resolve_cell(d(2024, 3, 11), t(9, 30), t(10, 20), view.entries());
        assert_eq!(after.kind, CellKind::Exception);
        assert!(after.entry.unwrap().is_cancellation());

        // ...while the recurring entry still resolves a week later.
        let next_week = resolve_cell(d(2024, 3, 18), t(9, 30), t(10, 20), view.entries());
        assert_eq!(next_week.kind, CellKind::Regular);
        assert_eq!(next_week.entry.unwrap().id, "e1");
    }
}
