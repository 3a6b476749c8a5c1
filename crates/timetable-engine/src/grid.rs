//! Week matrix construction with span merging.
//!
//! [`build_week`] drives the cell resolver across the full period × weekday
//! matrix for one displayed week and merges consecutive periods covered by
//! the same effective entry into a single [`SpanBlock`]. A class running
//! 08:30–11:10 over three catalog periods renders as one vertical block of
//! span 3, not three stacked cells — the periods underneath the block emit
//! [`GridCell::Spanned`] skip markers.
//!
//! Deterministic: rebuilding with identical inputs yields an identical
//! matrix. No clock, no store access, no randomness.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::catalog::PeriodCatalog;
use crate::entry::{ScheduleEntry, SpanBlock};
use crate::resolver::resolve_cell;

/// One slot of the week matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GridCell<'a> {
    /// A resolved block starting at this period (possibly spanning several).
    Block(SpanBlock<'a>),
    /// Consumed by a block that started in an earlier period row.
    Spanned,
}

/// The resolved matrix for one displayed week.
///
/// Rows are indexed by catalog period (row 0 is period 1), columns by day
/// offset from `week_start` (column 0 is `week_start` itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid<'a> {
    pub week_start: NaiveDate,
    /// The seven dates of the displayed week, in column order.
    pub dates: [NaiveDate; 7],
    pub rows: Vec<Vec<GridCell<'a>>>,
}

impl<'a> WeekGrid<'a> {
    /// The cell at a 1-based period index and 0-based day column.
    pub fn cell(&self, period_index: u32, day: usize) -> Option<&GridCell<'a>> {
        let row = period_index.checked_sub(1)? as usize;
        self.rows.get(row)?.get(day)
    }

    /// The block at a 1-based period index and 0-based day column, if that
    /// slot is not a skip marker.
    pub fn block_at(&self, period_index: u32, day: usize) -> Option<&SpanBlock<'a>> {
        match self.cell(period_index, day)? {
            GridCell::Block(block) => Some(block),
            GridCell::Spanned => None,
        }
    }
}

/// Build the resolved week matrix starting at `week_start`.
///
/// For each period row in catalog order and each of the seven dates from
/// `week_start`, resolves the cell ([`resolve_cell`]) unless a block from an
/// earlier row already consumed it. A non-empty resolved entry probes
/// forward: while the same entry's `end_time` strictly exceeds the next
/// period's start *and* that period still resolves to the same entry, the
/// block's span extends and the probed period is consumed for that column.
///
/// Empty cells are emitted as span-1 blocks with
/// [`crate::entry::CellKind::Empty`], so the matrix is always fully
/// populated.
///
/// `entries` are expected to be pre-scoped to one room by the
/// [`crate::view::ScheduleView`].
pub fn build_week<'a>(
    week_start: NaiveDate,
    catalog: &PeriodCatalog,
    entries: &'a [ScheduleEntry],
) -> WeekGrid<'a> {
    let mut dates = [week_start; 7];
    for (i, slot) in dates.iter_mut().enumerate() {
        *slot = week_start
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(week_start);
    }

    let periods = catalog.periods();
    let n = periods.len();
    let mut consumed = vec![[false; 7]; n];
    let mut rows = Vec::with_capacity(n);

    for (row, period) in periods.iter().enumerate() {
        let mut cells = Vec::with_capacity(7);
        for (col, date) in dates.iter().enumerate() {
            if consumed[row][col] {
                cells.push(GridCell::Spanned);
                continue;
            }

            let cell = resolve_cell(*date, period.start, period.end, entries);
            let mut span = 1u32;

            if let Some(entry) = cell.entry {
                // Forward probe: extend while the entry keeps running into
                // the next period and still wins resolution there.
                let mut next = row + 1;
                while next < n && entry.end_time > periods[next].start {
                    let probe = resolve_cell(*date, periods[next].start, periods[next].end, entries);
                    if probe.entry.map(|e| e.id.as_str()) != Some(entry.id.as_str()) {
                        break;
                    }
                    consumed[next][col] = true;
                    span += 1;
                    next += 1;
                }
            }

            cells.push(GridCell::Block(SpanBlock {
                start_period_index: period.index,
                period_span: span,
                cell,
            }));
        }
        rows.push(cells);
    }

    WeekGrid {
        week_start,
        dates,
        rows,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CellKind, Weekday, CANCELED};
    use chrono::NaiveTime;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entries(value: serde_json::Value) -> Vec<ScheduleEntry> {
        serde_json::from_value(value).unwrap()
    }

    /// Monday 2024-03-04 as the displayed week.
    const WEEK: (i32, u32, u32) = (2024, 3, 4);

    fn week_start() -> NaiveDate {
        d(WEEK.0, WEEK.1, WEEK.2)
    }

    #[test]
    fn test_week_dates_are_seven_consecutive_days() {
        let grid = build_week(week_start(), &PeriodCatalog::standard(), &[]);
        assert_eq!(grid.dates[0], d(2024, 3, 4));
        assert_eq!(grid.dates[6], d(2024, 3, 10));
    }

    #[test]
    fn test_empty_entries_yield_all_empty_blocks() {
        let catalog = PeriodCatalog::standard();
        let grid = build_week(week_start(), &catalog, &[]);
        assert_eq!(grid.rows.len(), catalog.len());
        for row in &grid.rows {
            assert_eq!(row.len(), 7);
            for cell in row {
                match cell {
                    GridCell::Block(block) => {
                        assert_eq!(block.cell.kind, CellKind::Empty);
                        assert_eq!(block.period_span, 1);
                    }
                    GridCell::Spanned => panic!("empty grid cannot contain skip markers"),
                }
            }
        }
    }

    #[test]
    fn test_three_period_class_merges_into_one_block() {
        // Covers periods 1-3 of the standard catalog:
        // 08:30/09:20, 09:30/10:20, 10:20/11:10.
        let entries = entries(serde_json::json!([{
            "id": "e1",
            "course_name": "Organic Chemistry",
            "start_time": "08:30",
            "end_time": "11:10",
            "weekdays": ["MON"],
        }]));
        let grid = build_week(week_start(), &PeriodCatalog::standard(), &entries);

        let block = grid.block_at(1, 0).expect("block at period 1, Monday");
        assert_eq!(block.start_period_index, 1);
        assert_eq!(block.period_span, 3);
        assert_eq!(block.cell.kind, CellKind::Regular);

        assert_eq!(grid.cell(2, 0), Some(&GridCell::Spanned));
        assert_eq!(grid.cell(3, 0), Some(&GridCell::Spanned));
        assert!(grid.block_at(4, 0).is_some(), "period 4 resolves independently");

        // Tuesday column is untouched.
        assert_eq!(grid.block_at(1, 1).unwrap().period_span, 1);
        assert_eq!(grid.block_at(1, 1).unwrap().cell.kind, CellKind::Empty);
    }

    #[test]
    fn test_span_stops_at_gap_before_next_period() {
        // Ends 09:20, before period 2 starts at 09:30: span stays 1.
        let entries = entries(serde_json::json!([{
            "id": "e1",
            "course_name": "Seminar",
            "start_time": "08:30",
            "end_time": "09:20",
            "weekdays": ["MON"],
        }]));
        let grid = build_week(week_start(), &PeriodCatalog::standard(), &entries);
        assert_eq!(grid.block_at(1, 0).unwrap().period_span, 1);
        assert_eq!(grid.block_at(2, 0).unwrap().cell.kind, CellKind::Empty);
    }

    #[test]
    fn test_span_probe_stops_where_exception_takes_over() {
        // Regular class covers periods 1-3, but an exception replaces just
        // the tail of the morning; the block must not swallow the
        // exception's periods.
        let entries = entries(serde_json::json!([
            {
                "id": "e1",
                "course_name": "Organic Chemistry",
                "start_time": "08:30",
                "end_time": "11:10",
                "weekdays": ["MON"],
            },
            {
                "id": "x1",
                "course_name": "Fire Drill",
                "start_time": "09:30",
                "end_time": "11:10",
                "effective_from": "2024-03-04",
                "effective_to": "2024-03-04",
                "is_exception": true,
            },
        ]));
        let grid = build_week(week_start(), &PeriodCatalog::standard(), &entries);

        let first = grid.block_at(1, 0).unwrap();
        assert_eq!(first.cell.entry.unwrap().id, "e1");
        assert_eq!(first.period_span, 1);

        let second = grid.block_at(2, 0).unwrap();
        assert_eq!(second.cell.kind, CellKind::Exception);
        assert_eq!(second.cell.entry.unwrap().id, "x1");
        assert_eq!(second.period_span, 2);
        assert_eq!(grid.cell(3, 0), Some(&GridCell::Spanned));
    }

    #[test]
    fn test_canceled_exception_occupies_the_slot() {
        let entries = entries(serde_json::json!([
            {
                "id": "e1",
                "course_name": "Linear Algebra",
                "start_time": "09:00",
                "end_time": "11:00",
                "weekdays": ["MON"],
            },
            {
                "id": "x1",
                "course_name": CANCELED,
                "start_time": "09:00",
                "end_time": "11:00",
                "effective_from": "2024-03-04",
                "effective_to": "2024-03-04",
                "is_exception": true,
            },
        ]));
        let grid = build_week(week_start(), &PeriodCatalog::standard(), &entries);
        let block = grid.block_at(1, 0).unwrap();
        assert_eq!(block.cell.kind, CellKind::Exception);
        assert!(block.cell.entry.unwrap().is_cancellation());
    }

    #[test]
    fn test_build_week_is_idempotent() {
        let entries = entries(serde_json::json!([
            {
                "id": "e1",
                "course_name": "Linear Algebra",
                "start_time": "09:00",
                "end_time": "11:00",
                "weekdays": ["MON", "WED"],
            },
            {
                "id": "e2",
                "course_name": "Statics",
                "start_time": "13:30",
                "end_time": "15:20",
                "weekdays": ["TUE"],
            },
        ]));
        let catalog = PeriodCatalog::standard();
        let first = build_week(week_start(), &catalog, &entries);
        let second = build_week(week_start(), &catalog, &entries);
        assert_eq!(first, second);
    }

    // ── property tests ──────────────────────────────────────────────────

    fn arb_entry() -> impl Strategy<Value = ScheduleEntry> {
        (0u32..12, 1u32..5, any::<bool>(), 0u8..7, any::<bool>(), 0u64..7).prop_map(
            |(slot, len, is_exception, weekday, enabled, day_offset)| {
                let start_min = 8 * 60 + slot * 30;
                let end_min = start_min + len * 30;
                let start = NaiveTime::from_hms_opt(start_min / 60, start_min % 60, 0).unwrap();
                let end = NaiveTime::from_hms_opt(end_min / 60, end_min % 60, 0).unwrap();
                let weekdays: BTreeSet<Weekday> = [[
                    Weekday::Mon,
                    Weekday::Tue,
                    Weekday::Wed,
                    Weekday::Thu,
                    Weekday::Fri,
                    Weekday::Sat,
                    Weekday::Sun,
                ][weekday as usize]]
                .into_iter()
                .collect();
                let pinned = NaiveDate::from_ymd_opt(2024, 3, 4)
                    .unwrap()
                    .checked_add_days(Days::new(day_offset))
                    .unwrap();
                ScheduleEntry {
                    id: format!("g{slot}-{len}-{weekday}-{day_offset}"),
                    room_id: None,
                    course_name: "Generated".to_string(),
                    lecturer: String::new(),
                    start_time: start,
                    end_time: end,
                    weekdays,
                    effective_from: is_exception.then_some(pinned),
                    effective_to: is_exception.then_some(pinned),
                    is_exception,
                    enabled,
                }
            },
        )
    }

    proptest! {
        #[test]
        fn build_week_is_deterministic(entries in proptest::collection::vec(arb_entry(), 0..8)) {
            let catalog = PeriodCatalog::standard();
            let first = build_week(week_start(), &catalog, &entries);
            let second = build_week(week_start(), &catalog, &entries);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_column_is_fully_covered(entries in proptest::collection::vec(arb_entry(), 0..8)) {
            let catalog = PeriodCatalog::standard();
            let grid = build_week(week_start(), &catalog, &entries);
            for col in 0..7 {
                let mut covered = 0u32;
                let mut skipped = 0usize;
                let mut blocks = 0usize;
                for row in &grid.rows {
                    match &row[col] {
                        GridCell::Block(block) => {
                            covered += block.period_span;
                            blocks += 1;
                        }
                        GridCell::Spanned => skipped += 1,
                    }
                }
                // Block spans account for every period exactly once; each
                // period beyond a block's first row is a skip marker.
                prop_assert_eq!(covered as usize, catalog.len());
                prop_assert_eq!(blocks + skipped, catalog.len());
            }
        }
    }
}
