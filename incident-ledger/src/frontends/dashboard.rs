//! DRRMC dashboard view: triage, dispatch, allocate, report, broadcast.

use super::{MapMarker, map_markers};
use crate::notifications::NotificationLog;
use crate::reports::analytics::{AnalyticsSource, IncidentAnalytics, compute_analytics};
use crate::reports::export::history_to_csv;
use crate::reports::{HistoryQuery, ReportFilter, ReportRepository};
use chrono_tz::Tz;
use shared::AppResult;
use shared::models::{
    Allocation, Channels, HistoryEntry, InventoryItem, Notification, Report, Zone,
};

/// Dashboard operations; ledger failures are converted to [`shared::AppError`]
#[derive(Debug, Clone)]
pub struct DashboardService<R: ReportRepository> {
    repo: R,
    notifications: NotificationLog,
    timezone: Tz,
}

impl<R: ReportRepository> DashboardService<R> {
    pub fn new(repo: R, notifications: NotificationLog, timezone: Tz) -> Self {
        Self {
            repo,
            notifications,
            timezone,
        }
    }

    // ========== Active reports ==========

    pub fn reports(&self, filter: &ReportFilter) -> AppResult<Vec<Report>> {
        Ok(self.repo.list_active(filter)?)
    }

    pub fn map(&self, filter: &ReportFilter) -> AppResult<Vec<MapMarker>> {
        let reports = self.repo.list_active(filter)?;
        Ok(map_markers(&reports))
    }

    /// Status change from the dashboard's status control
    pub fn update_status(&self, report_id: &str, status: &str) -> AppResult<()> {
        Ok(self.repo.transition_report_str(report_id, status)?)
    }

    pub fn allocate(&self, report_id: &str, item_id: &str, qty: u32) -> AppResult<Allocation> {
        Ok(self.repo.allocate_to_report(report_id, item_id, qty)?)
    }

    pub fn inventory(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.repo.list_inventory()?)
    }

    pub fn zones(&self) -> AppResult<Vec<Zone>> {
        Ok(self.repo.list_zones()?)
    }

    // ========== History ==========

    pub fn history(&self, query: &HistoryQuery) -> AppResult<Vec<HistoryEntry>> {
        Ok(self.repo.list_history(query)?)
    }

    pub fn clear_history(&self) -> AppResult<()> {
        Ok(self.repo.clear_history()?)
    }

    /// CSV of the entries matching `query`
    pub fn export_history_csv(&self, query: &HistoryQuery) -> AppResult<String> {
        let entries = self.repo.list_history(query)?;
        let zones = self.repo.list_zones()?;
        Ok(history_to_csv(&entries, &zones))
    }

    pub fn analytics(
        &self,
        source: AnalyticsSource,
        filter: &ReportFilter,
    ) -> AppResult<IncidentAnalytics> {
        Ok(compute_analytics(&self.repo, source, filter, self.timezone)?)
    }

    // ========== Notifications ==========

    pub fn send_notification(
        &self,
        message: &str,
        zone: Option<&str>,
        channels: Channels,
    ) -> AppResult<Notification> {
        Ok(self.notifications.send(message, zone, channels)?)
    }

    pub fn notification_log(&self) -> AppResult<Vec<Notification>> {
        Ok(self.notifications.list()?)
    }

    pub fn clear_notifications(&self) -> AppResult<()> {
        Ok(self.notifications.clear()?)
    }
}
