//! Repository seam between the front-end services and the ledger.

use super::ledger::{LedgerResult, ReportLedger};
use super::query::{HistoryQuery, ReportFilter};
use shared::models::{
    Allocation, HistoryEntry, InventoryItem, Report, ReportStatus, ReportSubmission, Zone,
};

/// Report operations the resident and dashboard views depend on.
///
/// Implemented by [`ReportLedger`]; tests may substitute their own.
pub trait ReportRepository: Send + Sync + Clone + 'static {
    fn submit_report(&self, submission: ReportSubmission) -> LedgerResult<Report>;

    fn transition_report(&self, id: &str, target: ReportStatus) -> LedgerResult<()>;

    /// Parse `target` at the boundary, rejecting unknown statuses
    fn transition_report_str(&self, id: &str, target: &str) -> LedgerResult<()>;

    fn allocate_to_report(&self, report_id: &str, item_id: &str, qty: u32) -> LedgerResult<Allocation>;

    fn clear_history(&self) -> LedgerResult<()>;

    fn list_active(&self, filter: &ReportFilter) -> LedgerResult<Vec<Report>>;

    fn list_history(&self, query: &HistoryQuery) -> LedgerResult<Vec<HistoryEntry>>;

    fn get_report(&self, id: &str) -> LedgerResult<Option<Report>>;

    fn list_zones(&self) -> LedgerResult<Vec<Zone>>;

    fn list_inventory(&self) -> LedgerResult<Vec<InventoryItem>>;

    /// Monotonic change counter for polling
    fn revision(&self) -> LedgerResult<u64>;
}

impl ReportRepository for ReportLedger {
    fn submit_report(&self, submission: ReportSubmission) -> LedgerResult<Report> {
        ReportLedger::submit_report(self, submission)
    }

    fn transition_report(&self, id: &str, target: ReportStatus) -> LedgerResult<()> {
        ReportLedger::transition_report(self, id, target)
    }

    fn transition_report_str(&self, id: &str, target: &str) -> LedgerResult<()> {
        ReportLedger::transition_report_str(self, id, target)
    }

    fn allocate_to_report(&self, report_id: &str, item_id: &str, qty: u32) -> LedgerResult<Allocation> {
        ReportLedger::allocate_to_report(self, report_id, item_id, qty)
    }

    fn clear_history(&self) -> LedgerResult<()> {
        ReportLedger::clear_history(self)
    }

    fn list_active(&self, filter: &ReportFilter) -> LedgerResult<Vec<Report>> {
        ReportLedger::list_active(self, filter)
    }

    fn list_history(&self, query: &HistoryQuery) -> LedgerResult<Vec<HistoryEntry>> {
        ReportLedger::list_history(self, query)
    }

    fn get_report(&self, id: &str) -> LedgerResult<Option<Report>> {
        ReportLedger::get_report(self, id)
    }

    fn list_zones(&self) -> LedgerResult<Vec<Zone>> {
        ReportLedger::list_zones(self)
    }

    fn list_inventory(&self) -> LedgerResult<Vec<InventoryItem>> {
        ReportLedger::list_inventory(self)
    }

    fn revision(&self) -> LedgerResult<u64> {
        ReportLedger::revision(self)
    }
}
