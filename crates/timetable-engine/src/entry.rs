//! Schedule records and the derived cell/span types.
//!
//! [`ScheduleEntry`] is the one record shape the engine reads: a recurring
//! class (weekday set over a validity window) or a single-date exception
//! (cancellation or replacement), distinguished by the `is_exception` tag.
//! Entries are created by the surrounding application and handed to the
//! engine as an immutable snapshot; the engine never deletes or mutates one.
//!
//! [`ResolvedCell`] and [`SpanBlock`] are ephemeral derived values produced
//! per resolution or grid build — they borrow from the entry snapshot and
//! are never persisted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::normalize::lenient_time;

/// Course name marking a cancellation exception.
///
/// A cancel decision synthesizes an exception entry carrying this sentinel
/// so the UI can render the slot as struck-through rather than replaced.
pub const CANCELED: &str = "CANCELED";

// ── Weekday codes ───────────────────────────────────────────────────────────

/// Day-of-week code used in recurring entries' weekday sets.
///
/// Serialized as the three-letter codes `"MON".."SUN"`. Parsed once at the
/// repository boundary; the resolver only ever compares typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "MON")]
    Mon,
    #[serde(rename = "TUE")]
    Tue,
    #[serde(rename = "WED")]
    Wed,
    #[serde(rename = "THU")]
    Thu,
    #[serde(rename = "FRI")]
    Fri,
    #[serde(rename = "SAT")]
    Sat,
    #[serde(rename = "SUN")]
    Sun,
}

impl Weekday {
    /// The three-letter code (`"MON"`, `"TUE"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MON" => Ok(Weekday::Mon),
            "TUE" => Ok(Weekday::Tue),
            "WED" => Ok(Weekday::Wed),
            "THU" => Ok(Weekday::Thu),
            "FRI" => Ok(Weekday::Fri),
            "SAT" => Ok(Weekday::Sat),
            "SUN" => Ok(Weekday::Sun),
            other => Err(format!("unknown weekday code '{other}'")),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(wd: chrono::Weekday) -> Self {
        match wd {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

// ── Schedule records ────────────────────────────────────────────────────────

fn default_enabled() -> bool {
    true
}

/// A recurring class or a single-date exception.
///
/// Half-open time semantics: the entry occupies `[start_time, end_time)`.
/// Entries spanning midnight are not supported (`start_time < end_time`).
///
/// When `is_exception` is true, `effective_from == effective_to` and that
/// date is the exact day the exception applies to; `weekdays` is not
/// consulted. Exceptions take precedence over recurring entries for their
/// date regardless of any recurring entry's `enabled` state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Stable store-assigned identifier.
    pub id: String,
    /// Room this entry is scoped to; `None` means unscoped (matches any room).
    #[serde(default)]
    pub room_id: Option<String>,
    pub course_name: String,
    #[serde(default)]
    pub lecturer: String,
    #[serde(with = "lenient_time")]
    pub start_time: NaiveTime,
    #[serde(with = "lenient_time")]
    pub end_time: NaiveTime,
    /// Weekdays a recurring entry applies to; ignored for exceptions.
    #[serde(default)]
    pub weekdays: BTreeSet<Weekday>,
    /// Inclusive start of the validity window; `None` means open-ended.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Inclusive end of the validity window; `None` means open-ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub is_exception: bool,
    /// Disabled recurring entries never resolve.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ScheduleEntry {
    /// Whether this entry is a cancellation exception.
    pub fn is_cancellation(&self) -> bool {
        self.is_exception && self.course_name == CANCELED
    }
}

/// A schedule record without a store-assigned id, as handed to
/// [`crate::store::ScheduleStore::create_entry`] for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleEntry {
    #[serde(default)]
    pub room_id: Option<String>,
    pub course_name: String,
    #[serde(default)]
    pub lecturer: String,
    #[serde(with = "lenient_time")]
    pub start_time: NaiveTime,
    #[serde(with = "lenient_time")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub weekdays: BTreeSet<Weekday>,
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub is_exception: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl NewScheduleEntry {
    /// Attach a store-assigned id, producing the persisted record. Used by
    /// [`crate::store::ScheduleStore`] implementations.
    pub fn with_id(self, id: impl Into<String>) -> ScheduleEntry {
        ScheduleEntry {
            id: id.into(),
            room_id: self.room_id,
            course_name: self.course_name,
            lecturer: self.lecturer,
            start_time: self.start_time,
            end_time: self.end_time,
            weekdays: self.weekdays,
            effective_from: self.effective_from,
            effective_to: self.effective_to,
            is_exception: self.is_exception,
            enabled: self.enabled,
        }
    }
}

// ── Derived cell types ──────────────────────────────────────────────────────

/// How a resolved cell was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Regular,
    Exception,
    Empty,
}

/// The effective entry for one (date, period) pair.
///
/// Ephemeral: borrows from the entry snapshot it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedCell<'a> {
    pub entry: Option<&'a ScheduleEntry>,
    pub kind: CellKind,
}

impl<'a> ResolvedCell<'a> {
    pub fn empty() -> Self {
        ResolvedCell {
            entry: None,
            kind: CellKind::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }
}

/// A merged run of consecutive periods covered by one effective entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpanBlock<'a> {
    /// 1-based index of the first period the block covers.
    pub start_period_index: u32,
    /// Number of consecutive periods merged into this block (≥ 1).
    pub period_span: u32,
    pub cell: ResolvedCell<'a>,
}

// ── Exception decisions ─────────────────────────────────────────────────────

/// What the user chose to do with a resolved cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DecisionAction {
    /// Cancel the class on one date.
    Cancel,
    /// Replace course and lecturer on one date.
    Replace { course_name: String, lecturer: String },
}

/// Input to the exception lifecycle manager: a cancel/replace choice made on
/// a resolved cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDecision {
    pub action: DecisionAction,
    /// The recurring entry the decision was made against.
    pub target: ScheduleEntry,
    /// The single date the resulting exception applies to.
    pub date: NaiveDate,
}

// ── Tests ───────────────────────────────────────────────────────────────────
