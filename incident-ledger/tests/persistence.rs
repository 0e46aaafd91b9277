//! Store persistence across process restarts (reopen of the same file)

use incident_ledger::{
    HistoryQuery, LedgerError, NotificationLog, ReportFilter, ReportLedger, StorageError,
};
use shared::models::{Channels, ReportStatus, ReportSubmission};

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ledger.redb");

    let (active_id, resolved_id) = {
        let ledger = ReportLedger::open(&db_path).unwrap();
        ledger.ensure_seeded().unwrap();

        let active = ledger
            .submit_report(ReportSubmission {
                incident_type: Some("Medical".to_string()),
                zone: Some("B20".to_string()),
                ..Default::default()
            })
            .unwrap();
        let resolved = ledger
            .submit_report(ReportSubmission {
                incident_type: Some("Fire".to_string()),
                ..Default::default()
            })
            .unwrap();
        ledger.allocate_to_report(&active.id, "I2", 12).unwrap();
        ledger
            .transition_report(&resolved.id, ReportStatus::Dispatched)
            .unwrap();
        ledger
            .transition_report(&resolved.id, ReportStatus::Resolved)
            .unwrap();

        NotificationLog::new(ledger.storage().clone())
            .send("Clinic open until 8pm", Some("B20"), Channels { sms: true, push: false })
            .unwrap();
        (active.id, resolved.id)
    };

    let ledger = ReportLedger::open(&db_path).unwrap();
    let outcome = ledger.ensure_seeded().unwrap();
    assert!(!outcome.zones_seeded && !outcome.inventory_seeded);

    let active = ledger.list_active(&ReportFilter::all()).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, active_id);
    assert_eq!(active[0].allocation.as_ref().unwrap().qty, 12);

    let history = ledger.list_history(&HistoryQuery::all()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].report.id, resolved_id);
    assert!(history[0].dispatched_at.is_some());
    assert!(history[0].resolved_at.is_some());

    // Stock draw-down is kept, not re-seeded
    let water = ledger
        .list_inventory()
        .unwrap()
        .into_iter()
        .find(|i| i.id == "I2")
        .unwrap();
    assert_eq!(water.qty, 188);

    let notifications = NotificationLog::new(ledger.storage().clone());
    assert_eq!(notifications.list().unwrap().len(), 1);
}

#[test]
fn test_revision_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ledger.redb");

    let before = {
        let ledger = ReportLedger::open(&db_path).unwrap();
        ledger.ensure_seeded().unwrap();
        ledger.submit_report(ReportSubmission::default()).unwrap();
        ledger.revision().unwrap()
    };

    let ledger = ReportLedger::open(&db_path).unwrap();
    assert_eq!(ledger.revision().unwrap(), before);
}

#[test]
fn test_store_is_owned_by_one_opener() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ledger.redb");

    let owner = ReportLedger::open(&db_path).unwrap();
    owner.ensure_seeded().unwrap();

    let err = ReportLedger::open(&db_path).unwrap_err();
    assert!(matches!(err, LedgerError::Storage(StorageError::AlreadyOpen)));
    assert!(err.to_string().contains("already open"));

    // A second view in the same process shares the storage instead
    let dashboard = ReportLedger::with_storage(owner.storage().clone());
    let report = owner.submit_report(ReportSubmission::default()).unwrap();
    assert!(dashboard.get_report(&report.id).unwrap().is_some());
    assert_eq!(dashboard.revision().unwrap(), owner.revision().unwrap());

    drop(dashboard);
    drop(owner);
    let reopened = ReportLedger::open(&db_path).unwrap();
    assert_eq!(reopened.list_active(&ReportFilter::all()).unwrap().len(), 1);
}
