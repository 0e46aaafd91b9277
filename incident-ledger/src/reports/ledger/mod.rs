//! ReportLedger - report lifecycle state machine and history mirroring
//!
//! # State machine
//!
//! ```text
//! submit ──► pending ──► dispatched ──► resolved
//!               │                          ▲
//!               └──────────────────────────┘
//! ```
//!
//! - `dispatched`: report stays active; history entry upserted with
//!   `dispatchedAt = now`
//! - `resolved`: report leaves the active collection; history entry upserted
//!   with `resolvedAt = now` (an earlier `dispatchedAt` is kept)
//! - `pending`: status reset in place, history untouched
//!
//! # Operation Flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Validate arguments
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Read the collections it touches
//!     ├─ 4. Mutate in memory
//!     ├─ 5. Write collections back, bump revision
//!     ├─ 6. Commit transaction
//!     └─ 7. Broadcast LedgerEvent
//! ```
//!
//! Any error before step 6 drops the transaction, so nothing is mutated.

mod error;
pub use error::*;

use super::history::HistoryLog;
use super::query::{HistoryQuery, ReportFilter, matches_search, sort_active, sort_history};
use super::seed::{self, SeedOutcome};
use super::storage::{Collection, LedgerStorage, StorageError};
use crate::utils::validation::normalize_submission;
use shared::models::{
    Allocation, HistoryEntry, InventoryItem, Report, ReportStatus, ReportSubmission, Zone,
};
use shared::util::{now_millis, prefixed_id};
use std::path::Path;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Change notifications for in-process subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    ReportSubmitted {
        report_id: String,
    },
    ReportTransitioned {
        report_id: String,
        status: ReportStatus,
    },
    AllocationAttached {
        report_id: String,
        allocation: Allocation,
    },
    HistoryCleared,
}

/// Report ledger over a [`LedgerStorage`]
///
/// Holds no cached state: every call reads the store, so clones sharing one
/// [`LedgerStorage`] always see each other's committed writes. The store is
/// owned by a single process; see [`LedgerStorage::open`].
#[derive(Clone)]
pub struct ReportLedger {
    storage: LedgerStorage,
    event_tx: broadcast::Sender<LedgerEvent>,
}

impl std::fmt::Debug for ReportLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportLedger")
            .field("storage", &"<LedgerStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl ReportLedger {
    /// Create a ReportLedger with the database at the given path
    pub fn open(db_path: impl AsRef<Path>) -> LedgerResult<Self> {
        let storage = LedgerStorage::open(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Create a ReportLedger over existing storage
    pub fn with_storage(storage: LedgerStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { storage, event_tx }
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &LedgerStorage {
        &self.storage
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: LedgerEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("Ledger event dropped: no active receivers");
        }
    }

    /// Seed zones and inventory if their stored schema versions are stale
    pub fn ensure_seeded(&self) -> LedgerResult<SeedOutcome> {
        Ok(seed::ensure_seeded(&self.storage)?)
    }

    /// Current store revision
    pub fn revision(&self) -> LedgerResult<u64> {
        Ok(self.storage.revision()?)
    }

    // ========== Commands ==========

    /// Create a pending report from a resident submission
    pub fn submit_report(&self, submission: ReportSubmission) -> LedgerResult<Report> {
        let fields = normalize_submission(submission)?;

        let txn = self.storage.begin_write()?;
        let mut reports: Vec<Report> = self.storage.read_collection_txn(&txn, Collection::Reports)?;

        let mut id = prefixed_id("R");
        while reports.iter().any(|r| r.id == id) {
            id = prefixed_id("R");
        }

        let report = Report {
            id,
            reporter_name: fields.reporter_name,
            reporter_phone: fields.reporter_phone,
            incident_type: fields.incident_type,
            description: fields.description,
            location: fields.location,
            zone: fields.zone,
            status: ReportStatus::Pending,
            created_at: now_millis(),
            media_ref: fields.media_ref,
            submitted_by_self: fields.submitted_by_self,
            allocation: None,
        };
        reports.push(report.clone());

        self.storage.write_collection_txn(&txn, Collection::Reports, &reports)?;
        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            report_id = %report.id,
            incident_type = %report.incident_type,
            zone = ?report.zone,
            "Report submitted"
        );
        self.broadcast(LedgerEvent::ReportSubmitted {
            report_id: report.id.clone(),
        });
        Ok(report)
    }

    /// Move an active report to `target`.
    ///
    /// Retrying the same `(id, target)` re-stamps the timestamp on the single
    /// existing history entry. Resolved reports are no longer active, so a
    /// retry of `resolved` reports `ReportNotFound`.
    pub fn transition_report(&self, id: &str, target: ReportStatus) -> LedgerResult<()> {
        let txn = self.storage.begin_write()?;
        let mut reports: Vec<Report> = self.storage.read_collection_txn(&txn, Collection::Reports)?;

        let Some(idx) = reports.iter().position(|r| r.id == id) else {
            tracing::warn!(report_id = %id, target = %target, "Transition on unknown report");
            return Err(LedgerError::ReportNotFound(id.to_string()));
        };
        let from = reports[idx].status;
        let now = now_millis();

        match target {
            ReportStatus::Dispatched => {
                reports[idx].status = ReportStatus::Dispatched;
                let mut history = self.load_history_txn(&txn)?;
                history.upsert_with(&reports[idx], |entry| {
                    entry.report.status = ReportStatus::Dispatched;
                    entry.dispatched_at = Some(now);
                });
                self.storage.write_collection_txn(&txn, Collection::Reports, &reports)?;
                self.storage
                    .write_collection_txn(&txn, Collection::History, history.entries())?;
            }
            ReportStatus::Resolved => {
                let mut report = reports.remove(idx);
                report.status = ReportStatus::Resolved;
                let mut history = self.load_history_txn(&txn)?;
                history.upsert_with(&report, |entry| {
                    entry.report.status = ReportStatus::Resolved;
                    entry.resolved_at = Some(now);
                });
                self.storage.write_collection_txn(&txn, Collection::Reports, &reports)?;
                self.storage
                    .write_collection_txn(&txn, Collection::History, history.entries())?;
            }
            ReportStatus::Pending => {
                reports[idx].status = ReportStatus::Pending;
                self.storage.write_collection_txn(&txn, Collection::Reports, &reports)?;
            }
        }

        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(report_id = %id, from = %from, to = %target, "Report transitioned");
        self.broadcast(LedgerEvent::ReportTransitioned {
            report_id: id.to_string(),
            status: target,
        });
        Ok(())
    }

    /// Transition using a raw status string from the boundary
    pub fn transition_report_str(&self, id: &str, target: &str) -> LedgerResult<()> {
        let target = target
            .parse::<ReportStatus>()
            .map_err(|e| LedgerError::InvalidStatus(e.value))?;
        self.transition_report(id, target)
    }

    /// Bind inventory to a report wherever it lives (active and/or history).
    ///
    /// Stock is decremented in the same commit. Allocating more than remains
    /// fails with `InsufficientQuantity` and leaves everything untouched. A
    /// later allocation replaces the report's allocation record.
    pub fn allocate_to_report(
        &self,
        report_id: &str,
        item_id: &str,
        qty: u32,
    ) -> LedgerResult<Allocation> {
        if qty == 0 {
            return Err(LedgerError::Validation(
                "allocation quantity must be at least 1".to_string(),
            ));
        }

        let txn = self.storage.begin_write()?;
        let mut reports: Vec<Report> = self.storage.read_collection_txn(&txn, Collection::Reports)?;
        let mut history = self.load_history_txn(&txn)?;
        let mut inventory: Vec<InventoryItem> =
            self.storage.read_collection_txn(&txn, Collection::Inventory)?;

        let active_idx = reports.iter().position(|r| r.id == report_id);
        let in_history = history.get(report_id).is_some();
        if active_idx.is_none() && !in_history {
            return Err(LedgerError::ReportNotFound(report_id.to_string()));
        }

        let item = inventory
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| LedgerError::ItemNotFound(item_id.to_string()))?;
        if qty > item.qty {
            return Err(LedgerError::InsufficientQuantity {
                item_id: item_id.to_string(),
                requested: qty,
                available: item.qty,
            });
        }
        item.qty -= qty;

        let allocation = Allocation {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            qty,
        };
        let remaining = item.qty;

        if let Some(idx) = active_idx {
            reports[idx].allocation = Some(allocation.clone());
            self.storage.write_collection_txn(&txn, Collection::Reports, &reports)?;
        }
        if let Some(entry) = history.get_mut(report_id) {
            entry.report.allocation = Some(allocation.clone());
            self.storage
                .write_collection_txn(&txn, Collection::History, history.entries())?;
        }
        self.storage
            .write_collection_txn(&txn, Collection::Inventory, &inventory)?;
        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            report_id = %report_id,
            item_id = %item_id,
            qty,
            remaining,
            "Inventory allocated"
        );
        self.broadcast(LedgerEvent::AllocationAttached {
            report_id: report_id.to_string(),
            allocation: allocation.clone(),
        });
        Ok(allocation)
    }

    /// Empty the history collection
    pub fn clear_history(&self) -> LedgerResult<()> {
        let txn = self.storage.begin_write()?;
        let removed = self
            .storage
            .read_collection_txn::<HistoryEntry>(&txn, Collection::History)?
            .len();
        self.storage
            .write_collection_txn::<HistoryEntry>(&txn, Collection::History, &[])?;
        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(removed, "History cleared");
        self.broadcast(LedgerEvent::HistoryCleared);
        Ok(())
    }

    // ========== Queries ==========

    /// Active reports, newest first
    pub fn list_active(&self, filter: &ReportFilter) -> LedgerResult<Vec<Report>> {
        let reports: Vec<Report> = self.storage.read_collection(Collection::Reports)?;
        let filtered = reports.into_iter().filter(|r| filter.matches(r)).collect();
        Ok(sort_active(filtered))
    }

    /// History entries, newest action first
    pub fn list_history(&self, query: &HistoryQuery) -> LedgerResult<Vec<HistoryEntry>> {
        let read_txn = self.storage.begin_read()?;
        let entries: Vec<HistoryEntry> =
            self.storage.read_collection_in(&read_txn, Collection::History)?;
        let zones: Vec<Zone> = match &query.search {
            Some(_) => self.storage.read_collection_in(&read_txn, Collection::Zones)?,
            None => Vec::new(),
        };

        let filtered = HistoryLog::from_entries(entries)
            .into_entries()
            .into_iter()
            .filter(|e| query.filter.matches(&e.report))
            .filter(|e| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|needle| matches_search(e, &zones, needle))
            })
            .collect();
        Ok(sort_history(filtered))
    }

    /// Look up an active report
    pub fn get_report(&self, id: &str) -> LedgerResult<Option<Report>> {
        let reports: Vec<Report> = self.storage.read_collection(Collection::Reports)?;
        Ok(reports.into_iter().find(|r| r.id == id))
    }

    /// Look up a history entry
    pub fn get_history_entry(&self, id: &str) -> LedgerResult<Option<HistoryEntry>> {
        let entries: Vec<HistoryEntry> = self.storage.read_collection(Collection::History)?;
        Ok(entries.into_iter().find(|e| e.id() == id))
    }

    pub fn list_zones(&self) -> LedgerResult<Vec<Zone>> {
        Ok(self.storage.read_collection(Collection::Zones)?)
    }

    pub fn list_inventory(&self) -> LedgerResult<Vec<InventoryItem>> {
        Ok(self.storage.read_collection(Collection::Inventory)?)
    }

    fn load_history_txn(&self, txn: &redb::WriteTransaction) -> LedgerResult<HistoryLog> {
        let entries = self.storage.read_collection_txn(txn, Collection::History)?;
        Ok(HistoryLog::from_entries(entries))
    }
}

#[cfg(test)]
mod tests;
