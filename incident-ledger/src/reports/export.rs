//! CSV export of the history listing

use shared::models::{HistoryEntry, Zone, zone_name};
use shared::util::millis_to_rfc3339;

pub const CSV_HEADER: [&str; 11] = [
    "id",
    "name",
    "phone",
    "incidentType",
    "description",
    "zone",
    "lat",
    "lng",
    "status",
    "action",
    "actionTime",
];

/// Quote a cell when it contains the delimiter, a quote or a line break.
fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn history_row(entry: &HistoryEntry, zones: &[Zone]) -> [String; 11] {
    let report = &entry.report;
    let zone = report
        .zone
        .as_deref()
        .map(|id| zone_name(zones, id).unwrap_or(id).to_string())
        .unwrap_or_default();
    let (lat, lng) = report
        .location
        .map(|loc| (loc.lat.to_string(), loc.lng.to_string()))
        .unwrap_or_default();
    let (action, action_time) = entry
        .last_action()
        .map(|(status, at)| (status.as_str().to_string(), millis_to_rfc3339(at)))
        .unwrap_or_default();

    [
        report.id.clone(),
        report.reporter_name.clone(),
        report.reporter_phone.clone(),
        report.incident_type.as_str().to_string(),
        report.description.clone(),
        zone,
        lat,
        lng,
        entry.status().as_str().to_string(),
        action,
        action_time,
    ]
}

/// Render entries (in the given order) as CSV with a header row.
pub fn history_to_csv(entries: &[HistoryEntry], zones: &[Zone]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for entry in entries {
        let row = history_row(entry, zones);
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}
