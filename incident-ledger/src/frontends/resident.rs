//! Resident view: submit reports, follow them, read broadcasts.

use super::{MapMarker, map_markers};
use crate::notifications::NotificationLog;
use crate::reports::export::history_to_csv;
use crate::reports::{HistoryQuery, ReportFilter, ReportRepository};
use shared::AppResult;
use shared::models::{HistoryEntry, Notification, Report, ReportSubmission};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct ResidentService<R: ReportRepository> {
    repo: R,
    notifications: NotificationLog,
    /// Zone of the resident's most recent zoned submission
    home_zone: Arc<RwLock<Option<String>>>,
}

impl<R: ReportRepository> ResidentService<R> {
    pub fn new(repo: R, notifications: NotificationLog) -> Self {
        Self {
            repo,
            notifications,
            home_zone: Arc::new(RwLock::new(None)),
        }
    }

    /// Submit a report from this device
    ///
    /// Rejections surface as [`shared::AppError`] with the ledger's error code.
    pub fn submit(&self, mut submission: ReportSubmission) -> AppResult<Report> {
        submission.submitted_by_self = true;
        let report = self.repo.submit_report(submission)?;
        if let Some(zone) = &report.zone
            && let Ok(mut home) = self.home_zone.write()
        {
            *home = Some(zone.clone());
        }
        Ok(report)
    }

    pub fn home_zone(&self) -> Option<String> {
        self.home_zone.read().ok().and_then(|z| z.clone())
    }

    pub fn active_reports(&self) -> AppResult<Vec<Report>> {
        Ok(self.repo.list_active(&ReportFilter::all())?)
    }

    pub fn responded_reports(&self) -> AppResult<Vec<HistoryEntry>> {
        Ok(self.repo.list_history(&HistoryQuery::all())?)
    }

    /// Map pins, optionally limited to the resident's home zone. Without a
    /// known home zone every located report is shown.
    pub fn map(&self, only_home_zone: bool) -> AppResult<Vec<MapMarker>> {
        let filter = match self.home_zone() {
            Some(zone) if only_home_zone => ReportFilter::all().zone(zone),
            _ => ReportFilter::all(),
        };
        let reports = self.repo.list_active(&filter)?;
        Ok(map_markers(&reports))
    }

    pub fn notifications(&self) -> AppResult<Vec<Notification>> {
        Ok(self.notifications.list()?)
    }

    pub fn clear_notifications(&self) -> AppResult<()> {
        Ok(self.notifications.clear()?)
    }

    pub fn clear_history(&self) -> AppResult<()> {
        Ok(self.repo.clear_history()?)
    }

    pub fn export_history_csv(&self) -> AppResult<String> {
        let entries = self.repo.list_history(&HistoryQuery::all())?;
        let zones = self.repo.list_zones()?;
        Ok(history_to_csv(&entries, &zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{LedgerStorage, ReportLedger};
    use shared::ErrorCode;
    use shared::models::{Channels, ReportStatus};

    fn create_test_service() -> (ReportLedger, ResidentService<ReportLedger>) {
        let storage = LedgerStorage::open_in_memory().unwrap();
        let ledger = ReportLedger::with_storage(storage.clone());
        ledger.ensure_seeded().unwrap();
        let service = ResidentService::new(ledger.clone(), NotificationLog::new(storage));
        (ledger, service)
    }

    #[test]
    fn test_submit_marks_own_report() {
        let (_, resident) = create_test_service();
        let report = resident
            .submit(ReportSubmission {
                incident_type: Some("Flood".to_string()),
                zone: Some("B04".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(report.submitted_by_self);
        assert_eq!(resident.home_zone().as_deref(), Some("B04"));
        assert_eq!(resident.active_reports().unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_submission_carries_error_code() {
        let (_, resident) = create_test_service();
        let err = resident
            .submit(ReportSubmission {
                incident_type: Some("Earthquake".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidIncidentType);
        assert_eq!(err.details.unwrap()["value"], "Earthquake");
        assert!(resident.home_zone().is_none());
        assert!(resident.active_reports().unwrap().is_empty());
    }

    #[test]
    fn test_map_home_zone_filter() {
        let (ledger, resident) = create_test_service();
        resident
            .submit(ReportSubmission {
                zone: Some("B01".to_string()),
                latitude: Some(10.7),
                longitude: Some(122.9),
                ..Default::default()
            })
            .unwrap();
        ledger
            .submit_report(ReportSubmission {
                zone: Some("B02".to_string()),
                latitude: Some(10.8),
                longitude: Some(122.95),
                ..Default::default()
            })
            .unwrap();
        // No location, never pinned
        ledger.submit_report(ReportSubmission::default()).unwrap();

        let all = resident.map(false).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.iter().filter(|m| m.mine).count(), 1);

        let home = resident.map(true).unwrap();
        assert_eq!(home.len(), 1);
        assert!(home[0].mine);
    }

    #[test]
    fn test_sees_dashboard_updates() {
        let (ledger, resident) = create_test_service();
        let report = resident.submit(ReportSubmission::default()).unwrap();
        ledger.transition_report(&report.id, ReportStatus::Resolved).unwrap();

        assert!(resident.active_reports().unwrap().is_empty());
        assert_eq!(resident.responded_reports().unwrap().len(), 1);
        assert_eq!(resident.export_history_csv().unwrap().lines().count(), 2);

        resident.clear_history().unwrap();
        assert!(resident.responded_reports().unwrap().is_empty());
    }

    #[test]
    fn test_notifications_round() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        let log = NotificationLog::new(storage.clone());
        let resident = ResidentService::new(ReportLedger::with_storage(storage), log.clone());

        log.send("Road closed", None, Channels::default()).unwrap();
        assert_eq!(resident.notifications().unwrap().len(), 1);
        resident.clear_notifications().unwrap();
        assert!(resident.notifications().unwrap().is_empty());
    }
}
