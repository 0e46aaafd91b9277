//! In-memory view of the history collection, indexed by report id.

use shared::models::{HistoryEntry, Report};
use std::collections::HashMap;

/// History entries in stored order plus an id → position index.
///
/// Invariant: `index` maps every entry id to its position in `entries`, and
/// no two entries share an id.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    index: HashMap<String, usize>,
}

impl HistoryLog {
    /// Build from stored entries. Duplicate ids left behind by older writers
    /// are collapsed onto the first occurrence.
    pub fn from_entries(stored: Vec<HistoryEntry>) -> Self {
        let mut log = Self::default();
        for entry in stored {
            if log.index.contains_key(entry.id()) {
                tracing::warn!(report_id = %entry.id(), "Dropping duplicate history entry");
                continue;
            }
            log.index.insert(entry.id().to_string(), log.entries.len());
            log.entries.push(entry);
        }
        log
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut HistoryEntry> {
        self.index.get(id).map(|&i| &mut self.entries[i])
    }

    /// Create the entry for `report` if absent (snapshotting it), then let
    /// `update` mutate the entry in place.
    pub fn upsert_with(
        &mut self,
        report: &Report,
        update: impl FnOnce(&mut HistoryEntry),
    ) -> &HistoryEntry {
        let pos = match self.index.get(&report.id) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.entries.push(HistoryEntry {
                    report: report.clone(),
                    dispatched_at: None,
                    resolved_at: None,
                });
                self.index.insert(report.id.clone(), pos);
                pos
            }
        };
        let entry = &mut self.entries[pos];
        update(entry);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }
}
