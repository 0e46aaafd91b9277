use super::*;
use shared::models::Location;

// ========================================================================
// 13. Full lifecycle: resident submits, dashboard dispatches and resolves
// ========================================================================

#[test]
fn test_fire_report_full_lifecycle() {
    let ledger = create_test_ledger();
    let report = ledger
        .submit_report(ReportSubmission {
            reporter_name: Some("Jose Rizal".to_string()),
            incident_type: Some("Fire".to_string()),
            description: Some("Kitchen fire spreading".to_string()),
            zone: Some("B01".to_string()),
            latitude: Some(10.7302),
            longitude: Some(122.9455),
            submitted_by_self: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(report.location, Location::new(10.7302, 122.9455));
    assert!(report.submitted_by_self);

    let in_zone = ledger.list_active(&ReportFilter::all().zone("B01")).unwrap();
    assert_eq!(in_zone.len(), 1);
    assert!(ledger.list_active(&ReportFilter::all().zone("B02")).unwrap().is_empty());

    ledger.transition_report(&report.id, ReportStatus::Dispatched).unwrap();
    let dispatched = ledger
        .list_active(&ReportFilter::all().status(ReportStatus::Dispatched))
        .unwrap();
    assert_eq!(dispatched[0].id, report.id);

    ledger.allocate_to_report(&report.id, "I3", 10).unwrap();
    ledger.transition_report(&report.id, ReportStatus::Resolved).unwrap();

    assert!(active_ids(&ledger).is_empty());
    let history = ledger.list_history(&HistoryQuery::all()).unwrap();
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.report.reporter_name, "Jose Rizal");
    assert_eq!(entry.status(), ReportStatus::Resolved);
    assert!(entry.dispatched_at.is_some());
    assert!(entry.resolved_at.is_some());
    assert_eq!(entry.report.allocation.as_ref().unwrap().item_name, "Blankets");
}

// ========================================================================
// 14. History search and filters
// ========================================================================

#[test]
fn test_history_search_flood() {
    let ledger = create_test_ledger();
    let flood = ledger
        .submit_report(submission("Flood", Some("B07"), "Water rising on the road"))
        .unwrap();
    let fire = ledger
        .submit_report(submission("Fire", Some("B07"), "Grass fire"))
        .unwrap();
    ledger.transition_report(&flood.id, ReportStatus::Resolved).unwrap();
    ledger.transition_report(&fire.id, ReportStatus::Resolved).unwrap();

    let found = ledger
        .list_history(&HistoryQuery::all().search("flood"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].report.id, flood.id);

    // Zone names are searchable
    let by_zone_name = ledger
        .list_history(&HistoryQuery::all().search("fabrica"))
        .unwrap();
    assert_eq!(by_zone_name.len(), 2);
}

#[test]
fn test_history_filter_by_status() {
    let ledger = create_test_ledger();
    let a = submit(&ledger, "Fire", Some("B01"));
    let b = submit(&ledger, "Fire", Some("B02"));
    ledger.transition_report(&a, ReportStatus::Dispatched).unwrap();
    ledger.transition_report(&b, ReportStatus::Resolved).unwrap();

    let resolved = ledger
        .list_history(&HistoryQuery::all().with_filter(ReportFilter::all().status(ReportStatus::Resolved)))
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].report.id, b);

    let zone = ledger
        .list_history(&HistoryQuery::all().with_filter(ReportFilter::all().zone("B01")))
        .unwrap();
    assert_eq!(zone[0].report.id, a);
}

#[test]
fn test_history_newest_action_first() {
    let ledger = create_test_ledger();
    let first = submit(&ledger, "Fire", None);
    let second = submit(&ledger, "Flood", None);

    ledger.transition_report(&first, ReportStatus::Dispatched).unwrap();
    ledger.transition_report(&second, ReportStatus::Dispatched).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    // Acting on the older entry again moves it to the top
    ledger.transition_report(&first, ReportStatus::Resolved).unwrap();

    assert_eq!(history_ids(&ledger), vec![first, second]);
}

#[test]
fn test_active_newest_first() {
    let ledger = create_test_ledger();
    let a = submit(&ledger, "Fire", None);
    let b = submit(&ledger, "Fire", None);
    let c = submit(&ledger, "Fire", None);
    assert_eq!(active_ids(&ledger), vec![c, b, a]);
}

// ========================================================================
// 15. Independent handles on one store
// ========================================================================

#[test]
fn test_two_handles_share_state() {
    let resident = create_test_ledger();
    let dashboard = ReportLedger::with_storage(resident.storage().clone());

    let id = submit(&resident, "Medical", Some("B10"));
    assert_eq!(active_ids(&dashboard), vec![id.clone()]);

    dashboard.transition_report(&id, ReportStatus::Resolved).unwrap();
    assert!(active_ids(&resident).is_empty());
    assert_eq!(history_ids(&resident), vec![id]);
    assert_eq!(resident.revision().unwrap(), dashboard.revision().unwrap());
}

#[test]
fn test_zones_and_inventory_seeded() {
    let ledger = create_test_ledger();
    let zones = ledger.list_zones().unwrap();
    assert_eq!(zones.len(), 45);
    assert_eq!(zones[6].name, "Bantud Fabrica");

    let names: Vec<String> = ledger.list_inventory().unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["Rice 5kg", "Bottled Water (500ml)", "Blankets"]);
}
