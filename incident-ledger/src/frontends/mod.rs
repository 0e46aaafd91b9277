//! Front-end services
//!
//! The resident and DRRMC dashboard views. Both talk to the ledger only
//! through [`ReportRepository`](crate::reports::ReportRepository), and to the
//! notification log for broadcasts.

pub mod dashboard;
pub mod resident;

pub use dashboard::DashboardService;
pub use resident::ResidentService;

use serde::Serialize;
use shared::models::{IncidentType, Report, ReportStatus};

/// Map pin for a located report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub report_id: String,
    pub lat: f64,
    pub lng: f64,
    pub incident_type: IncidentType,
    pub status: ReportStatus,
    /// Submitted from this device
    pub mine: bool,
}

/// Pins for the reports that carry a location
pub fn map_markers<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Vec<MapMarker> {
    reports
        .into_iter()
        .filter_map(|r| {
            let loc = r.location?;
            Some(MapMarker {
                report_id: r.id.clone(),
                lat: loc.lat,
                lng: loc.lng,
                incident_type: r.incident_type,
                status: r.status,
                mine: r.submitted_by_self,
            })
        })
        .collect()
}
