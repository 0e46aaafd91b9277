//! Incident counts for the chart layer

use super::ledger::LedgerResult;
use super::query::{HistoryQuery, ReportFilter};
use super::traits::ReportRepository;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::models::Report;
use std::collections::BTreeMap;

/// Bucket used for reports without a zone
pub const UNZONED: &str = "Unzoned";

/// Which collection the charts are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsSource {
    #[default]
    Active,
    History,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentAnalytics {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_zone: BTreeMap<String, usize>,
    /// Calendar day of `created_at` in the business timezone
    pub by_day: BTreeMap<NaiveDate, usize>,
}

impl IncidentAnalytics {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a Report>, tz: Tz) -> Self {
        let mut out = Self::default();
        for report in reports {
            out.total += 1;
            *out.by_type
                .entry(report.incident_type.as_str().to_string())
                .or_default() += 1;
            *out.by_zone
                .entry(report.zone.clone().unwrap_or_else(|| UNZONED.to_string()))
                .or_default() += 1;

            match chrono::DateTime::from_timestamp_millis(report.created_at) {
                Some(utc) => *out.by_day.entry(utc.with_timezone(&tz).date_naive()).or_default() += 1,
                None => tracing::debug!(report_id = %report.id, "Skipping out-of-range createdAt"),
            }
        }
        out
    }
}

/// Aggregate the selected source under the given filter
pub fn compute_analytics<R: ReportRepository>(
    repo: &R,
    source: AnalyticsSource,
    filter: &ReportFilter,
    tz: Tz,
) -> LedgerResult<IncidentAnalytics> {
    let analytics = match source {
        AnalyticsSource::Active => {
            let reports = repo.list_active(filter)?;
            IncidentAnalytics::from_reports(&reports, tz)
        }
        AnalyticsSource::History => {
            let query = HistoryQuery::all().with_filter(filter.clone());
            let entries = repo.list_history(&query)?;
            IncidentAnalytics::from_reports(entries.iter().map(|e| &e.report), tz)
        }
    };
    Ok(analytics)
}
