//! End-to-end: HTTP roster -> store -> live counter -> editor -> counter.

use crate::helpers::{monday_at, persistence_for};
use dutyboard::config::{ApiConfig, EditorConfig};
use dutyboard::schedule::{DutyKind, Weekday, render_week};
use dutyboard::{
    DashboardError, EmployeeId, FieldKey, HttpPersistence, LiveCounter, ManualClock,
    ScheduleEditor, ScheduleStore,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn roster_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "a",
                "name": "Ada",
                "schedule": {
                    "Monday": {
                        "tier1Start": "09:00", "tier1End": "17:00",
                        "lunchStart": "12:00", "lunchEnd": "13:00"
                    }
                }
            },
            {
                "_id": "b",
                "name": "Bo",
                "schedule": {
                    "Monday": {"phonesStart": "08:00", "phonesEnd": "12:00"}
                }
            }
        ])))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn editing_a_day_updates_live_counts() {
    let server = roster_server().await;
    Mock::given(method("PUT"))
        .and(path("/api/employees/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = ScheduleStore::new(persistence_for(&server));
    store.load().await.unwrap();

    let clock = Arc::new(ManualClock::new(monday_at(12, 30)));
    let counter = LiveCounter::new(store.subscribe(), clock).attach();
    let first = counter.latest();
    assert_eq!(first.counts.get(DutyKind::Tier1), 1);
    assert_eq!(first.counts.get(DutyKind::Phones), 0);
    assert_eq!(first.counts.total(), 1);

    let mut counts = counter.subscribe();
    counts.borrow_and_update();

    ScheduleEditor::new(EmployeeId::new("b"), Weekday::Monday)
        .with(FieldKey::start(DutyKind::Lunch), "12:00")
        .with(FieldKey::end(DutyKind::Lunch), "13:00")
        .submit(&store, &EditorConfig::default())
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(2), counts.changed())
        .await
        .expect("roster change should resample")
        .unwrap();
    let snapshot = counts.borrow().clone();
    assert_eq!(snapshot.counts.get(DutyKind::Tier1), 1);
    assert_eq!(snapshot.counts.get(DutyKind::Lunch), 1);
    assert_eq!(snapshot.counts.total(), 2);

    // Bo's phones window was replaced, not merged.
    let bo = store.employee(&EmployeeId::new("b")).unwrap();
    assert_eq!(bo.schedule.day(Weekday::Monday).unwrap().window(DutyKind::Phones), None);

    counter.detach().await;
}

#[tokio::test]
async fn rejected_write_keeps_cache_and_counts() {
    let server = roster_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/employees/a"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = ScheduleStore::new(persistence_for(&server));
    store.load().await.unwrap();
    let before = store.snapshot();

    let err = store.remove_employee(&EmployeeId::new("a")).await.unwrap_err();

    assert!(matches!(err, DashboardError::Persistence(_)));
    assert_eq!(*store.snapshot(), *before);
}

#[tokio::test]
async fn unreachable_server_leaves_empty_cache() {
    let store = ScheduleStore::new(HttpPersistence::new(&ApiConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        timeout_secs: 2,
    }));

    let err = store.load().await.unwrap_err();

    assert!(err.is_retryable());
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn loaded_roster_renders_week_grid() {
    let server = roster_server().await;
    let store = ScheduleStore::new(persistence_for(&server));
    let roster = store.load().await.unwrap();

    let ada = roster.get(&EmployeeId::new("a")).unwrap();
    let week = render_week(ada);
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].weekday, Weekday::Sunday);
    assert!(week[0].blocks.is_empty());

    let monday = &week[1];
    let kinds: Vec<DutyKind> = monday.blocks.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, [DutyKind::Lunch, DutyKind::Tier1]);
    assert_eq!(monday.blocks[1].title(), "Tier 1: 09:00 - 17:00");
}
