use super::*;
use shared::models::IncidentType;

fn create_test_ledger() -> ReportLedger {
    let storage = LedgerStorage::open_in_memory().unwrap();
    let ledger = ReportLedger::with_storage(storage);
    ledger.ensure_seeded().unwrap();
    ledger
}

fn submission(incident_type: &str, zone: Option<&str>, description: &str) -> ReportSubmission {
    ReportSubmission {
        reporter_name: Some("Maria Santos".to_string()),
        reporter_phone: Some("09171234567".to_string()),
        incident_type: Some(incident_type.to_string()),
        description: Some(description.to_string()),
        zone: zone.map(str::to_string),
        ..Default::default()
    }
}

// ========================================================================
// Helper: submit a report and return its id
// ========================================================================

fn submit(ledger: &ReportLedger, incident_type: &str, zone: Option<&str>) -> String {
    ledger
        .submit_report(submission(incident_type, zone, "test incident"))
        .unwrap()
        .id
}

fn active_ids(ledger: &ReportLedger) -> Vec<String> {
    ledger
        .list_active(&ReportFilter::all())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect()
}

fn history_ids(ledger: &ReportLedger) -> Vec<String> {
    ledger
        .list_history(&HistoryQuery::all())
        .unwrap()
        .into_iter()
        .map(|e| e.report.id)
        .collect()
}

mod test_flows;
