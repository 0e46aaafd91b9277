//! Input validation helpers
//!
//! Centralized text length constants and the submission normalizer.

use crate::reports::ledger::{LedgerError, LedgerResult};
use shared::models::{IncidentType, Location, ReportSubmission};

// ── Text length limits ──────────────────────────────────────────────

/// Reporter names, zone ids
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Incident descriptions, notification messages
pub const MAX_NOTE_LEN: usize = 2000;

/// Opaque media references (blob URLs)
pub const MAX_URL_LEN: usize = 2048;

/// Name used when the resident leaves the name field blank
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> LedgerResult<()> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(LedgerError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Trimmed text, or `None` when blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Submission after defaults and closed-set checks
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSubmission {
    pub reporter_name: String,
    pub reporter_phone: String,
    pub incident_type: IncidentType,
    pub description: String,
    pub location: Option<Location>,
    pub zone: Option<String>,
    pub media_ref: Option<String>,
    pub submitted_by_self: bool,
}

/// Apply defaults to a resident submission.
///
/// Missing optional fields never fail: blank name → `Anonymous`, blank type →
/// `Other`, half a coordinate pair → no location, blank zone → unassigned.
/// Values that are present but outside the accepted set do fail.
pub fn normalize_submission(sub: ReportSubmission) -> LedgerResult<NormalizedSubmission> {
    validate_optional_text(&sub.reporter_name, "reporterName", MAX_NAME_LEN)?;
    validate_optional_text(&sub.reporter_phone, "reporterPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&sub.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&sub.zone, "zone", MAX_NAME_LEN)?;
    validate_optional_text(&sub.media_ref, "mediaRef", MAX_URL_LEN)?;

    let incident_type = match non_blank(sub.incident_type) {
        Some(raw) => raw
            .parse::<IncidentType>()
            .map_err(|e| LedgerError::InvalidIncidentType(e.value))?,
        None => IncidentType::default(),
    };

    let location = match (sub.latitude, sub.longitude) {
        (Some(lat), Some(lng)) => {
            Some(Location::new(lat, lng).ok_or(LedgerError::InvalidLocation { lat, lng })?)
        }
        (None, None) => None,
        (lat, lng) => {
            tracing::debug!(?lat, ?lng, "Partial coordinates dropped");
            None
        }
    };

    Ok(NormalizedSubmission {
        reporter_name: non_blank(sub.reporter_name).unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
        reporter_phone: non_blank(sub.reporter_phone).unwrap_or_default(),
        incident_type,
        description: sub.description.unwrap_or_default(),
        location,
        zone: non_blank(sub.zone),
        media_ref: non_blank(sub.media_ref),
        submitted_by_self: sub.submitted_by_self,
    })
}
