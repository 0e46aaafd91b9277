//! History Model

use super::report::{Report, ReportStatus};
use serde::{Deserialize, Serialize};

/// Report snapshot frozen at its first lifecycle transition.
///
/// Later transitions update `status` and the matching timestamp in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub report: Report,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatched_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
}

impl HistoryEntry {
    pub fn id(&self) -> &str {
        &self.report.id
    }

    pub fn status(&self) -> ReportStatus {
        self.report.status
    }

    /// Newest of `resolved_at` / `dispatched_at`
    pub fn last_action_at(&self) -> Option<i64> {
        self.resolved_at.max(self.dispatched_at)
    }

    /// Lifecycle action the entry last recorded, with its timestamp
    pub fn last_action(&self) -> Option<(ReportStatus, i64)> {
        match (self.dispatched_at, self.resolved_at) {
            (Some(d), Some(r)) if d > r => Some((ReportStatus::Dispatched, d)),
            (_, Some(r)) => Some((ReportStatus::Resolved, r)),
            (Some(d), None) => Some((ReportStatus::Dispatched, d)),
            (None, None) => None,
        }
    }
}
