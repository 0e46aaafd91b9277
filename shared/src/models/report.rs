//! Report Model
//!
//! One incident submission from a resident. Wire names are camelCase so the
//! persisted JSON matches what both front-ends render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string does not name a member of a closed enum set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ============================================================================
// Incident Type
// ============================================================================

/// Incident category (fixed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum IncidentType {
    Fire,
    Flood,
    Accident,
    Medical,
    #[default]
    Other,
}

impl IncidentType {
    pub const ALL: [IncidentType; 5] = [
        IncidentType::Fire,
        IncidentType::Flood,
        IncidentType::Accident,
        IncidentType::Medical,
        IncidentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentType::Fire => "Fire",
            IncidentType::Flood => "Flood",
            IncidentType::Accident => "Accident",
            IncidentType::Medical => "Medical",
            IncidentType::Other => "Other",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentType {
    type Err = ParseEnumError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseEnumError {
                kind: "incident type",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Report Status
// ============================================================================

/// Report lifecycle status
///
/// ```text
/// pending ──► dispatched ──► resolved
///    └──────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Dispatched,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::Dispatched,
        ReportStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Dispatched => "dispatched",
            ReportStatus::Resolved => "resolved",
        }
    }

    /// Resolved reports never re-enter the active collection
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Resolved)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseEnumError {
                kind: "report status",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Location / Allocation
// ============================================================================

/// WGS84 coordinate pair. Either both halves are present or the whole
/// location is absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Range-checked constructor
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

/// Inventory bound to a report's response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub item_id: String,
    pub item_name: String,
    pub qty: u32,
}

// ============================================================================
// Report
// ============================================================================

/// Report entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_phone: String,
    pub incident_type: IncidentType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Zone id; `None` means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub status: ReportStatus,
    /// Unix millis
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_ref: Option<String>,
    #[serde(default)]
    pub submitted_by_self: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation>,
}

/// Submit report payload (resident form)
///
/// Every field is optional; the ledger substitutes defaults. `incident_type`
/// is kept as raw text so the closed-set check happens in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    pub reporter_name: Option<String>,
    pub reporter_phone: Option<String>,
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zone: Option<String>,
    pub media_ref: Option<String>,
    #[serde(default)]
    pub submitted_by_self: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_type_parse_is_case_insensitive() {
        assert_eq!("fire".parse::<IncidentType>(), Ok(IncidentType::Fire));
        assert_eq!(" FLOOD ".parse::<IncidentType>(), Ok(IncidentType::Flood));
        assert_eq!("Medical".parse::<IncidentType>(), Ok(IncidentType::Medical));
    }

    #[test]
    fn test_incident_type_rejects_unknown() {
        let err = "Earthquake".parse::<IncidentType>().unwrap_err();
        assert_eq!(err.kind, "incident type");
        assert_eq!(err.value, "Earthquake");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("dispatched".parse::<ReportStatus>(), Ok(ReportStatus::Dispatched));
        assert!("closed".parse::<ReportStatus>().is_err());
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(!ReportStatus::Dispatched.is_terminal());
    }

    #[test]
    fn test_location_range_checks() {
        assert!(Location::new(10.7, 122.56).is_some());
        assert!(Location::new(90.5, 0.0).is_none());
        assert!(Location::new(0.0, -180.1).is_none());
        assert!(Location::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_report_wire_format() {
        let report = Report {
            id: "R-1".to_string(),
            reporter_name: "Ana".to_string(),
            reporter_phone: String::new(),
            incident_type: IncidentType::Fire,
            description: "Kitchen fire".to_string(),
            location: None,
            zone: Some("B01".to_string()),
            status: ReportStatus::Pending,
            created_at: 1,
            media_ref: None,
            submitted_by_self: true,
            allocation: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["incidentType"], "Fire");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["zone"], "B01");
        assert_eq!(json["submittedBySelf"], true);
        assert!(json.get("location").is_none());
    }
}
