//! REST contract tests for `HttpPersistence`.
//!
//! These pin the exact request shapes sent to the roster API and how
//! responses and failures are mapped.

use crate::helpers::persistence_for;
use dutyboard::schedule::{DaySchedule, DutyKind, TimeWindow, WeeklySchedule, Weekday};
use dutyboard::{DashboardError, EmployeeId, Persistence};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_roster_decodes_underscore_ids_and_day_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "65f0",
                "name": "Ada",
                "schedule": {
                    "Monday": {
                        "phonesStart": "08:00", "phonesEnd": "10:00",
                        "tier1Start": "", "tier1End": "",
                        "tier2Start": "", "tier2End": "",
                        "lunchStart": "12:00", "lunchEnd": "13:00"
                    },
                    "Tuesday": {}
                }
            },
            {"id": "65f1", "name": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let employees = persistence_for(&server).fetch_roster().await.unwrap();

    assert_eq!(employees.len(), 2);
    let ada = &employees[0];
    assert_eq!(ada.id, EmployeeId::new("65f0"));
    let monday = ada.schedule.day(Weekday::Monday).unwrap();
    assert_eq!(
        monday.window(DutyKind::Phones),
        Some(TimeWindow::parse("08:00", "10:00").unwrap())
    );
    assert_eq!(monday.window(DutyKind::Tier1), None);
    assert!(ada.schedule.day(Weekday::Tuesday).unwrap().is_empty());
    assert!(ada.schedule.day(Weekday::Friday).is_none());

    assert_eq!(employees[1].display_name(), "Unnamed Employee");
}

#[tokio::test]
async fn null_bounds_and_null_days_do_not_fail_the_roster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "a",
                "name": "Ada",
                "schedule": {"Monday": {"tier1Start": "09:00", "tier1End": "17:00"}}
            },
            {
                "_id": "b",
                "name": "Bo",
                "schedule": {
                    "Monday": {"lunchStart": null, "lunchEnd": null},
                    "Tuesday": null
                }
            }
        ])))
        .mount(&server)
        .await;

    let employees = persistence_for(&server).fetch_roster().await.unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(
        employees[0].schedule.day(Weekday::Monday).unwrap().window(DutyKind::Tier1),
        Some(TimeWindow::parse("09:00", "17:00").unwrap())
    );
    let bo = &employees[1];
    assert!(bo.schedule.day(Weekday::Monday).unwrap().is_empty());
    assert!(bo.schedule.day(Weekday::Tuesday).is_none());
}

#[tokio::test]
async fn create_posts_seven_empty_days_and_returns_id() {
    let server = MockServer::start().await;
    let empty_day = json!({
        "phonesStart": "", "phonesEnd": "",
        "tier1Start": "", "tier1End": "",
        "tier2Start": "", "tier2End": "",
        "lunchStart": "", "lunchEnd": ""
    });
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({
            "name": "Grace",
            "schedule": {
                "Sunday": empty_day.clone(),
                "Monday": empty_day.clone(),
                "Tuesday": empty_day.clone(),
                "Wednesday": empty_day.clone(),
                "Thursday": empty_day.clone(),
                "Friday": empty_day.clone(),
                "Saturday": empty_day,
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "new-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = persistence_for(&server)
        .create_employee("Grace", &WeeklySchedule::empty_week())
        .await
        .unwrap();
    assert_eq!(id.as_str(), "new-1");
}

#[tokio::test]
async fn create_without_id_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = persistence_for(&server)
        .create_employee("Grace", &WeeklySchedule::empty_week())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Persistence(_)), "got {err:?}");
}

#[tokio::test]
async fn update_puts_day_and_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/employees/e-7"))
        .and(body_partial_json(json!({
            "day": "Wednesday",
            "schedule": {
                "tier2Start": "13:00",
                "tier2End": "15:30",
                "lunchStart": "",
                "lunchEnd": ""
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let day = DaySchedule::empty()
        .with_window(DutyKind::Tier2, TimeWindow::parse("13:00", "15:30").unwrap());
    persistence_for(&server)
        .update_day(&EmployeeId::new("e-7"), Weekday::Wednesday, &day)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_hits_employee_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/employees/e-7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    persistence_for(&server)
        .delete_employee(&EmployeeId::new("e-7"))
        .await
        .unwrap();
}

#[tokio::test]
async fn server_error_maps_to_persistence_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = persistence_for(&server).fetch_roster().await.unwrap_err();
    let msg = err.to_string();
    assert!(err.is_retryable());
    assert!(msg.contains("HTTP 500"), "got {msg}");
    assert!(msg.contains("database unavailable"), "got {msg}");
}

#[tokio::test]
async fn malformed_body_maps_to_persistence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = persistence_for(&server).fetch_roster().await.unwrap_err();
    assert!(matches!(err, DashboardError::Persistence(_)));
}

#[tokio::test]
async fn long_error_bodies_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/employees/x"))
        .respond_with(ResponseTemplate::new(404).set_body_string("e".repeat(5000)))
        .mount(&server)
        .await;

    let err = persistence_for(&server)
        .delete_employee(&EmployeeId::new("x"))
        .await
        .unwrap_err();
    assert!(err.to_string().len() < 700);
}
