//! Listing filters shared by the report, history and analytics views.

use crate::utils::validation::non_blank;
use serde::{Deserialize, Serialize};
use shared::models::{HistoryEntry, Report, ReportStatus, Zone, zone_name};

/// Zone / status filter. `None` means "all"; so does a blank zone, as sent
/// by an unselected zone picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub zone: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = non_blank(Some(zone.into()));
        self
    }

    pub fn status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, report: &Report) -> bool {
        if let Some(zone) = self.zone.as_deref().map(str::trim).filter(|z| !z.is_empty())
            && report.zone.as_deref() != Some(zone)
        {
            return false;
        }
        self.status.is_none_or(|s| report.status == s)
    }
}

/// History listing query: filter plus free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(flatten)]
    pub filter: ReportFilter,
    pub search: Option<String>,
}

impl HistoryQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Case-insensitive substring match over incident type, description, zone id,
/// zone name and reporter name. A blank needle matches everything.
pub fn matches_search(entry: &HistoryEntry, zones: &[Zone], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let report = &entry.report;
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(report.incident_type.as_str())
        || contains(&report.description)
        || contains(&report.reporter_name)
        || report.zone.as_deref().is_some_and(|z| {
            contains(z) || zone_name(zones, z).is_some_and(contains)
        })
}

/// Newest `created_at` first; equal timestamps keep the later insertion first.
pub fn sort_active(reports: Vec<Report>) -> Vec<Report> {
    let mut sorted: Vec<Report> = reports.into_iter().rev().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Newest lifecycle action first; equal timestamps keep the later insertion first.
pub fn sort_history(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut sorted: Vec<HistoryEntry> = entries.into_iter().rev().collect();
    sorted.sort_by(|a, b| b.last_action_at().cmp(&a.last_action_at()));
    sorted
}
