//! The caller-owned working set of schedule entries.
//!
//! A [`ScheduleView`] is an immutable-for-the-call snapshot fed to the
//! resolver and grid builder. The engine borrows it per call and never
//! stores a reference beyond the call. After an exception is persisted, the
//! caller [`append`](ScheduleView::append)s the stored entry so the next
//! resolution reflects it without a full reload (read-after-write for an
//! append-only record log); [`refresh`](ScheduleView::refresh) does the
//! full reload.

use serde_json::Value;

use crate::entry::ScheduleEntry;
use crate::error::Result;
use crate::store::ScheduleStore;

/// A record that failed per-record ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestError {
    /// Position of the record in the ingested batch.
    pub index: usize,
    pub message: String,
}

/// In-memory, read-mostly working set of entries for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleView {
    room_id: Option<String>,
    entries: Vec<ScheduleEntry>,
}

impl ScheduleView {
    /// An unscoped view over the given entries.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        ScheduleView {
            room_id: None,
            entries,
        }
    }

    /// A view scoped to one room; keeps entries whose `room_id` matches or
    /// is unset.
    pub fn for_room(room: impl Into<String>, entries: Vec<ScheduleEntry>) -> Self {
        let room = room.into();
        let entries = entries
            .into_iter()
            .filter(|e| e.room_id.as_deref().is_none_or(|r| r == room))
            .collect();
        ScheduleView {
            room_id: Some(room),
            entries,
        }
    }

    /// Load a view from the store, scoped to `room` when given.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::TimetableError::Repository`] from the store.
    pub fn from_store(store: &impl ScheduleStore, room: Option<&str>) -> Result<Self> {
        let entries = store.list_entries(room)?;
        Ok(ScheduleView {
            room_id: room.map(str::to_string),
            entries,
        })
    }

    /// The snapshot, in the order resolution will iterate it.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a freshly persisted entry into the snapshot so subsequent
    /// resolutions see it without a reload.
    pub fn append(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Replace the snapshot with the store's current state.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::TimetableError::Repository`]; on error the
    /// existing snapshot is left untouched.
    pub fn refresh(&mut self, store: &impl ScheduleStore) -> Result<()> {
        self.entries = store.list_entries(self.room_id.as_deref())?;
        Ok(())
    }

    /// Ingest plain JSON records one at a time.
    ///
    /// Each record is deserialized independently; malformed ones are
    /// reported in the error list and skipped, so a single bad record never
    /// blanks a whole week's view. The caller decides what to log.
    pub fn ingest_json(records: &[Value]) -> (Vec<ScheduleEntry>, Vec<IngestError>) {
        let mut entries = Vec::with_capacity(records.len());
        let mut errors = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match serde_json::from_value::<ScheduleEntry>(record.clone()) {
                Ok(entry) => entries.push(entry),
                Err(e) => errors.push(IngestError {
                    index,
                    message: e.to_string(),
                }),
            }
        }
        (entries, errors)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
