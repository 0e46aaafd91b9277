//! Concurrent writers on one store
//!
//! Resident and dashboard handles interleave submissions, transitions and
//! allocations from several threads; every write must land exactly once.

use incident_ledger::{HistoryQuery, LedgerError, ReportFilter, ReportLedger};
use shared::models::{ReportStatus, ReportSubmission};
use std::collections::HashSet;
use std::thread;

const WRITERS: usize = 8;
const REPORTS_PER_WRITER: usize = 25;

#[test]
fn test_concurrent_submit_and_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ReportLedger::open(dir.path().join("ledger.redb")).unwrap();
    ledger.ensure_seeded().unwrap();
    let start_revision = ledger.revision().unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                let mut ids = Vec::with_capacity(REPORTS_PER_WRITER);
                for i in 0..REPORTS_PER_WRITER {
                    let report = ledger
                        .submit_report(ReportSubmission {
                            incident_type: Some("Flood".to_string()),
                            description: Some(format!("writer {w} report {i}")),
                            zone: Some(format!("B{:02}", (w % 45) + 1)),
                            ..Default::default()
                        })
                        .unwrap();
                    // Resolve every other report
                    if i % 2 == 0 {
                        ledger
                            .transition_report(&report.id, ReportStatus::Resolved)
                            .unwrap();
                    }
                    ids.push(report.id);
                }
                ids
            })
        })
        .collect();

    let all_ids: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let unique: HashSet<&String> = all_ids.iter().collect();
    assert_eq!(unique.len(), WRITERS * REPORTS_PER_WRITER);

    let resolved_per_writer = REPORTS_PER_WRITER.div_ceil(2);
    let active = ledger.list_active(&ReportFilter::all()).unwrap();
    let history = ledger.list_history(&HistoryQuery::all()).unwrap();
    assert_eq!(history.len(), WRITERS * resolved_per_writer);
    assert_eq!(active.len() + history.len(), WRITERS * REPORTS_PER_WRITER);

    let writes = WRITERS * (REPORTS_PER_WRITER + resolved_per_writer);
    assert_eq!(ledger.revision().unwrap(), start_revision + writes as u64);
}

#[test]
fn test_concurrent_allocation_never_oversells() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ReportLedger::open(dir.path().join("ledger.redb")).unwrap();
    ledger.ensure_seeded().unwrap();

    // Rice starts at 50; 8 writers × 10 attempts × 1 unit = 80 attempts
    let report = ledger.submit_report(ReportSubmission::default()).unwrap();
    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let ledger = ledger.clone();
            let id = report.id.clone();
            thread::spawn(move || {
                let mut ok = 0usize;
                for _ in 0..10 {
                    match ledger.allocate_to_report(&id, "I1", 1) {
                        Ok(_) => ok += 1,
                        Err(LedgerError::InsufficientQuantity { .. }) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                ok
            })
        })
        .collect();

    let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(granted, 50);

    let rice = ledger.list_inventory().unwrap().remove(0);
    assert_eq!(rice.qty, 0);
}
