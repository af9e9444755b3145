use pretty_assertions::assert_eq;
use serde_json::json;

use rmg_core::domain::{AuthUser, Category, Incident, IncidentId, OwnerRef, Priority, Status};

#[test]
fn incident_serializes_to_the_service_wire_shape() {
    let incident = Incident {
        id: Some(12),
        incident_id: IncidentId::new("RMG4827192024"),
        reporter_name: "avery".to_string(),
        category: Category::Government,
        details: "switch rebooted".to_string(),
        priority: Priority::Medium,
        status: Status::InProgress,
        reported_at: Some("2026-03-01T08:00:00Z".to_string()),
        owner: Some(OwnerRef { id: 7 }),
    };

    let value = serde_json::to_value(&incident).expect("serialize");
    assert_eq!(
        value,
        json!({
            "id": 12,
            "incidentId": "RMG4827192024",
            "reporterName": "avery",
            "enterpriseOrGovernment": "Government",
            "incidentDetails": "switch rebooted",
            "priority": "Medium",
            "status": "In progress",
            "incidentReportedDateTime": "2026-03-01T08:00:00Z",
            "user": { "id": 7 }
        })
    );
}

#[test]
fn server_records_without_optional_fields_deserialize() {
    let incident: Incident = serde_json::from_value(json!({
        "incidentId": "RMG555552026",
        "reporterName": "avery",
        "enterpriseOrGovernment": "Enterprise",
        "incidentDetails": "dns outage",
        "priority": "Low",
        "status": "Open"
    }))
    .expect("deserialize");

    assert_eq!(incident.id, None);
    assert_eq!(incident.reported_at, None);
    assert_eq!(incident.owner, None);
    assert_eq!(incident.status, Status::Open);
}

#[test]
fn wire_round_trip_preserves_the_record() {
    let incident = Incident {
        id: Some(3),
        incident_id: IncidentId::new("RMG101012025"),
        reporter_name: "dana".to_string(),
        category: Category::Enterprise,
        details: "printer fire".to_string(),
        priority: Priority::High,
        status: Status::Closed,
        reported_at: Some("2025-11-30T23:59:59Z".to_string()),
        owner: Some(OwnerRef { id: 4 }),
    };

    let text = serde_json::to_string(&incident).expect("serialize");
    let back: Incident = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, incident);
}

#[test]
fn auth_payloads_may_be_partial() {
    let auth: AuthUser = serde_json::from_value(json!({})).expect("empty payload");
    assert_eq!(auth, AuthUser::default());

    let auth: AuthUser = serde_json::from_value(json!({ "id": 7, "username": "avery" }))
        .expect("full payload");
    assert_eq!(auth.id, Some(7));
    assert_eq!(auth.username.as_deref(), Some("avery"));
}
