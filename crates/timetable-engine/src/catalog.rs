//! The fixed table of class periods — the addressable resolution unit of
//! the grid.
//!
//! Periods are ordered, contiguous or separated by small breaks, and never
//! overlap. The catalog is process-wide and read-only; callers either use
//! [`PeriodCatalog::standard`] or validate their own table through
//! [`PeriodCatalog::new`].

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::TimetableError;

/// One time-of-day slot in the daily catalog (e.g., "Period 4: 09:30–10:20").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    /// 1-based position in the catalog.
    pub index: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Ordered, immutable table of class periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCatalog {
    periods: Vec<Period>,
}

impl PeriodCatalog {
    /// Build a catalog from `(start, end)` pairs, assigning 1-based indices
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidCatalog`] if the table is empty, a
    /// period has `start >= end`, or consecutive periods overlap (a period
    /// must not start before the previous one ends).
    pub fn new(slots: Vec<(NaiveTime, NaiveTime)>) -> Result<Self, TimetableError> {
        if slots.is_empty() {
            return Err(TimetableError::InvalidCatalog("empty period table".to_string()));
        }

        let mut periods: Vec<Period> = Vec::with_capacity(slots.len());
        for (i, (start, end)) in slots.into_iter().enumerate() {
            let index = i as u32 + 1;
            if start >= end {
                return Err(TimetableError::InvalidCatalog(format!(
                    "period {index} has start {start} >= end {end}"
                )));
            }
            if let Some(prev) = periods.last() {
                if start < prev.end {
                    return Err(TimetableError::InvalidCatalog(format!(
                        "period {index} starts at {start}, before period {} ends at {}",
                        prev.index, prev.end
                    )));
                }
            }
            periods.push(Period { index, start, end });
        }

        Ok(PeriodCatalog { periods })
    }

    /// The standard 12-period school-day grid.
    ///
    /// Morning periods run 08:30–13:00, afternoon 13:30–18:00, evening
    /// 18:30–20:10. Some neighbors are back-to-back (periods 2/3, 4/5,
    /// 7/8, 9/10, 11/12), the rest have 10–30 minute breaks.
    pub fn standard() -> Self {
        const TABLE: [(u32, u32, u32, u32); 12] = [
            (8, 30, 9, 20),
            (9, 30, 10, 20),
            (10, 20, 11, 10),
            (11, 20, 12, 10),
            (12, 10, 13, 0),
            (13, 30, 14, 20),
            (14, 30, 15, 20),
            (15, 20, 16, 10),
            (16, 20, 17, 10),
            (17, 10, 18, 0),
            (18, 30, 19, 20),
            (19, 20, 20, 10),
        ];

        let periods = TABLE
            .iter()
            .enumerate()
            .map(|(i, &(sh, sm, eh, em))| Period {
                index: i as u32 + 1,
                start: hm(sh, sm),
                end: hm(eh, em),
            })
            .collect();

        PeriodCatalog { periods }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Look up a period by its 1-based index.
    pub fn get(&self, index: u32) -> Option<&Period> {
        index
            .checked_sub(1)
            .and_then(|i| self.periods.get(i as usize))
    }
}

/// Wall-clock time from literal hour/minute; falls back to midnight for
/// out-of-range values, which the static table never contains.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// ── Tests ───────────────────────────────────────────────────────────────────
