//! The repository boundary.
//!
//! The engine never talks to storage directly; it reads an already-fetched
//! snapshot and hands newly constructed exception entries to a
//! [`ScheduleStore`] for persistence. The trait is synchronous — the
//! surrounding application owns any async or network edge and adapts it
//! behind this seam. The core performs no retries; retry policy belongs to
//! the caller.

use crate::entry::{NewScheduleEntry, ScheduleEntry};
use crate::error::Result;

/// Read/write access to persisted schedule entries.
pub trait ScheduleStore {
    /// List entries, optionally scoped to one room. Entries whose `room_id`
    /// is unset match any room. Order is arbitrary but must be consistent
    /// within one call — it governs the resolver's first-match tie-break.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TimetableError::Repository`] on read failure.
    fn list_entries(&self, room: Option<&str>) -> Result<Vec<ScheduleEntry>>;

    /// Persist a new entry, returning it with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TimetableError::Repository`] on write failure.
    fn create_entry(&mut self, entry: NewScheduleEntry) -> Result<ScheduleEntry>;
}

/// In-memory store: the development and test backend.
///
/// Ids are assigned monotonically (`"mem-1"`, `"mem-2"`, ...). Entries are
/// kept in insertion order, so listing is deterministic.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Vec<ScheduleEntry>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-identified entries.
    pub fn with_entries(entries: Vec<ScheduleEntry>) -> Self {
        MemoryStore {
            entries,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScheduleStore for MemoryStore {
    fn list_entries(&self, room: Option<&str>) -> Result<Vec<ScheduleEntry>> {
        let entries = self
            .entries
            .iter()
            .filter(|e| match (room, e.room_id.as_deref()) {
                (Some(room), Some(entry_room)) => room == entry_room,
                _ => true,
            })
            .cloned()
            .collect();
        Ok(entries)
    }

    fn create_entry(&mut self, entry: NewScheduleEntry) -> Result<ScheduleEntry> {
        self.next_id += 1;
        let entry = entry.with_id(format!("mem-{}", self.next_id));
        self.entries.push(entry.clone());
        Ok(entry)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
