//! Incident report ledger
//!
//! - **storage**: redb tables holding each collection as a JSON array
//! - **ledger**: `ReportLedger` lifecycle commands and queries
//! - **history**: id-indexed view used for history upserts
//! - **query**: zone / status filters, search, ordering
//! - **seed**: versioned zone and inventory reference data
//! - **traits**: `ReportRepository`, the seam the front-ends depend on
//! - **export** / **analytics**: CSV and chart aggregations over listings
//!
//! # Data Flow
//!
//! ```text
//! ResidentService / DashboardService
//!            │ (ReportRepository)
//!            ▼
//!      ReportLedger ──► LedgerStorage (redb) ──► revision bump
//!            │
//!            ▼
//!      LedgerEvent broadcast
//! ```

pub mod analytics;
pub mod export;
pub mod history;
pub mod ledger;
pub mod query;
pub mod seed;
pub mod storage;
pub mod traits;

pub use analytics::{AnalyticsSource, IncidentAnalytics};
pub use ledger::{LedgerError, LedgerEvent, LedgerResult, ReportLedger};
pub use query::{HistoryQuery, ReportFilter};
pub use seed::SeedOutcome;
pub use storage::{Collection, LedgerStorage, StorageError};
pub use traits::ReportRepository;
