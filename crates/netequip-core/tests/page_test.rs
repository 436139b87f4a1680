// Page-controller scenarios against a mocked inventory API.
#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netequip_core::{
    ConnectionConfig, CoreError, DevicePortSchema, DisplayOptions, EmployeeSchema, EquipmentFilter,
    EquipmentSchema, EquipmentStatus, EquipmentStats, EquipmentTypeSchema, Inventory, IpAddressSchema,
    MaintenanceSchema, NoticeLevel, Outcome, SubmitOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Inventory) {
    let server = MockServer::start().await;
    let config = ConnectionConfig {
        base_url: format!("{}/api", server.uri()),
        ..ConnectionConfig::default()
    };
    let inventory = Inventory::new(&config, DisplayOptions::default()).unwrap();
    (server, inventory)
}

async fn mount_get(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn two_devices() -> serde_json::Value {
    json!([
        { "id": 1, "name": "core-sw-01", "status": "Active", "typeId": 1 },
        { "id": 2, "name": "edge-rtr", "status": "Maintenance", "typeId": 1 },
    ])
}

// ── Loading and filtering ───────────────────────────────────────────

#[tokio::test]
async fn test_load_and_stats() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", two_devices()).await;
    mount_get(&server, "/api/equipment-types", json!([{ "id": 1, "typeName": "Switch" }])).await;
    mount_get(&server, "/api/employees", json!([])).await;

    let page = inventory.open::<EquipmentSchema>().await.unwrap();

    assert_eq!(
        page.stats(),
        EquipmentStats {
            total: 2,
            active: 1,
            maintenance: 1
        }
    );
    assert_eq!(page.references().type_name(1), Some("Switch"));
    assert!(page.notices().is_empty());
}

#[tokio::test]
async fn test_reference_failure_becomes_notice() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", two_devices()).await;
    mount_get(&server, "/api/employees", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/equipment-types"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let page = inventory.open::<EquipmentSchema>().await.unwrap();

    assert_eq!(page.records().len(), 2);
    assert!(page.references().equipment_types.is_empty());
    assert_eq!(page.notices().len(), 1);
    assert_eq!(page.notices()[0].level, NoticeLevel::Warning);
}

#[tokio::test]
async fn test_primary_failure_fails_load() {
    let (server, inventory) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "status": 503, "message": "Database unavailable"
        })))
        .mount(&server)
        .await;

    let err = inventory.open::<EmployeeSchema>().await.unwrap_err();
    assert_eq!(err.to_string(), "Database unavailable");
}

#[tokio::test]
async fn test_reset_filters_restores_collection() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", two_devices()).await;
    mount_get(&server, "/api/equipment-types", json!([])).await;
    mount_get(&server, "/api/employees", json!([])).await;

    let mut page = inventory.open::<EquipmentSchema>().await.unwrap();
    page.set_search("EDGE");
    page.set_filter(EquipmentFilter {
        status: Some(EquipmentStatus::Maintenance),
        ..EquipmentFilter::default()
    });
    assert_eq!(page.visible().iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);

    page.reset_filters();
    assert!(page.query().is_default());
    let ids: Vec<_> = page.visible().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", two_devices()).await;
    mount_get(&server, "/api/equipment-types", json!([])).await;
    mount_get(&server, "/api/employees", json!([])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/equipment/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = inventory.open::<EquipmentSchema>().await.unwrap();
    let outcome = page
        .delete(2, &|prompt: &str| {
            assert!(prompt.contains("edge-rtr"));
            false
        })
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Declined);
    assert_eq!(page.records().len(), 2);
}

#[tokio::test]
async fn test_accepted_delete_reloads() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment-types", json!([])).await;
    mount_get(&server, "/api/employees", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/equipment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_devices()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/equipment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "core-sw-01", "status": "Active" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/equipment/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = inventory.open::<EquipmentSchema>().await.unwrap();
    let outcome = page.delete(2, &|_: &str| true).await.unwrap();

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(page.records().len(), 1);
    assert_eq!(page.notices().last().unwrap().level, NoticeLevel::Success);
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/employees", json!([{ "id": 1, "fullName": "Anna" }])).await;

    let mut page = inventory.open::<EmployeeSchema>().await.unwrap();
    let outcome = page.delete(42, &|_: &str| true).await.unwrap();

    assert_eq!(outcome, Outcome::NotInCache);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

// ── Create / edit ───────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_ip_rejected_before_any_request() {
    let (server, inventory) = setup().await;
    let mut page = inventory.page::<IpAddressSchema>();

    page.open_create();
    page.set_field("equipmentId", "1").unwrap();
    page.set_field("ipAddress", "999.1.1.1").unwrap();
    let outcome = page.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.field == "ipAddress"));
    assert!(page.modal().is_open());
    assert!(page.modal().error().is_some());
    assert_eq!(page.form().unwrap().ip_address, "999.1.1.1");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_create_reloads_once() {
    let (server, inventory) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/employees/exists/email"))
        .and(query_param("email", "ivan@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(false))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({
            "fullName": "Ivan Sidorov",
            "position": null,
            "email": "ivan@example.com",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "fullName": "Ivan Sidorov", "email": "ivan@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "fullName": "Ivan Sidorov", "email": "ivan@example.com" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = inventory.page::<EmployeeSchema>();
    page.open_create();
    page.set_field("fullName", " Ivan Sidorov ").unwrap();
    page.set_field("email", "ivan@example.com").unwrap();
    let outcome = page.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(ref e) if e.id == 7));
    assert!(!page.modal().is_open());
    assert_eq!(page.records().len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_form_open_without_reload() {
    let (server, inventory) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/employees/3"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409, "message": "Email already in use"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/employees/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "fullName": "Anna Petrova", "email": "anna@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = inventory.page::<EmployeeSchema>();
    page.open_edit(3).await.unwrap();
    assert_eq!(page.form().unwrap().full_name, "Anna Petrova");

    page.set_field("email", "taken@example.com").unwrap();
    let err = page.submit().await.unwrap_err();

    assert!(matches!(err, CoreError::Conflict { .. }));
    assert!(page.modal().is_open());
    assert_eq!(
        page.modal().error(),
        Some("Save failed: Email already in use")
    );
}

#[tokio::test]
async fn test_duplicate_blocks_create() {
    let (server, inventory) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment-types/exists"))
        .and(query_param("typeName", "Switch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/equipment-types"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = inventory.page::<netequip_core::EquipmentTypeSchema>();
    page.open_create();
    page.set_field("typeName", "Switch").unwrap();
    let outcome = page.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Duplicate(_)));
    assert!(page.modal().is_open());
}

#[tokio::test]
async fn test_failing_uniqueness_check_is_ignored() {
    let (server, inventory) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/ip-addresses/exists"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ip-addresses"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5, "ipAddress": "10.0.0.5", "equipmentId": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/api/ip-addresses", json!([])).await;

    let mut page = inventory.page::<IpAddressSchema>();
    page.open_create();
    page.set_field("equipmentId", "1").unwrap();
    page.set_field("ipAddress", "10.0.0.5").unwrap();

    assert!(matches!(
        page.submit().await.unwrap(),
        SubmitOutcome::Saved(_)
    ));
}

#[tokio::test]
async fn test_edit_from_detail() {
    let (server, inventory) = setup().await;
    mount_get(
        &server,
        "/api/employees/4",
        json!({ "id": 4, "fullName": "Oleg", "position": "Admin" }),
    )
    .await;

    let mut page = inventory.page::<EmployeeSchema>();
    let selected = page.open_detail(4).await.unwrap();
    assert_eq!(selected.full_name, "Oleg");

    assert_eq!(page.edit_from_detail().await.unwrap(), Outcome::Done);
    assert!(page.selected().is_none());
    assert_eq!(page.form().unwrap().position, "Admin");
}

// ── Relationship actions ────────────────────────────────────────────

#[tokio::test]
async fn test_connect_consults_available_ports_first() {
    let (server, inventory) = setup().await;
    mount_get(
        &server,
        "/api/equipment",
        json!([{ "id": 1, "name": "core-sw" }, { "id": 2, "name": "edge-rtr" }]),
    )
    .await;
    mount_get(
        &server,
        "/api/device-ports",
        json!([
            { "id": 10, "equipmentId": 1, "equipmentName": "core-sw", "portNumber": 1 },
            { "id": 20, "equipmentId": 2, "equipmentName": "edge-rtr", "portNumber": 1 },
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/device-ports/equipment/2/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 20, "equipmentId": 2, "portNumber": 1 }
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/device-ports/equipment/2/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/device-ports/10/connect/20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "connectedToPortId": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = inventory.open::<DevicePortSchema>().await.unwrap();

    let candidates = page.connect_candidates(10).unwrap();
    assert_eq!(
        candidates.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
        vec!["edge-rtr"]
    );

    assert_eq!(page.connect(10, 2, 20).await.unwrap(), Outcome::Done);

    let requests = server.received_requests().await.unwrap();
    let order: Vec<String> = requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    let available_at = order
        .iter()
        .position(|r| r == "GET /api/device-ports/equipment/2/available")
        .unwrap();
    let patch_at = order
        .iter()
        .position(|r| r == "PATCH /api/device-ports/10/connect/20")
        .unwrap();
    assert!(available_at < patch_at);
    assert_eq!(order.last().unwrap(), "GET /api/device-ports");

    // Port 20 is taken now; a second attempt stops before the PATCH.
    assert!(page.available_ports(2).await.unwrap().is_empty());
    let err = page.connect(10, 2, 20).await.unwrap_err();
    assert!(matches!(err, CoreError::PortUnavailable { port_id: 20, .. }));
}

#[tokio::test]
async fn test_disconnect_requires_confirmation() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", json!([])).await;
    mount_get(
        &server,
        "/api/device-ports",
        json!([{ "id": 10, "equipmentName": "core-sw", "portNumber": 3, "connectedToPortId": 20 }]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path("/api/device-ports/10/disconnect"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = inventory.open::<DevicePortSchema>().await.unwrap();

    let declined = page.disconnect(10, &|_: &str| false).await.unwrap();
    assert_eq!(declined, Outcome::Declined);

    let done = page.disconnect(10, &|_: &str| true).await.unwrap();
    assert_eq!(done, Outcome::Done);
}

#[tokio::test]
async fn test_set_primary_and_schedule_next() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/api/equipment", json!([])).await;
    mount_get(&server, "/api/employees", json!([])).await;
    mount_get(&server, "/api/ip-addresses", json!([{ "id": 6, "ipAddress": "10.0.0.6" }])).await;
    mount_get(
        &server,
        "/api/maintenance-history",
        json!([{ "id": 40, "equipmentId": 8, "type": "Routine" }]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path("/api/ip-addresses/6/set-primary"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/maintenance-history/equipment/8/schedule-next"))
        .and(query_param("date", "2025-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 40 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ips = inventory.open::<IpAddressSchema>().await.unwrap();
    assert_eq!(ips.set_primary(6).await.unwrap(), Outcome::Done);
    assert_eq!(ips.set_primary(99).await.unwrap(), Outcome::NotInCache);

    let mut history = inventory.open::<MaintenanceSchema>().await.unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    history.schedule_next(8, date).await.unwrap();
    match history.schedule_next(9, date).await.unwrap_err() {
        CoreError::Validation(invalid) => {
            assert_eq!(invalid.field, "equipmentId");
            assert!(invalid.reason.contains("equipment 9"));
        }
        other => panic!("expected a validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_type_search_by_manufacturer_and_model() {
    let (server, inventory) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment-types/search"))
        .and(query_param("manufacturer", "Cisco"))
        .and(query_param("model", "C9300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "typeName": "Switch", "manufacturer": "Cisco", "model": "C9300"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/equipment-types/search"))
        .and(query_param("manufacturer", "Juniper"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "Equipment type not found" })),
        )
        .mount(&server)
        .await;

    let page = inventory.page::<EquipmentTypeSchema>();
    let found = page
        .search_by_manufacturer_model(" Cisco ", "C9300")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.type_name, "Switch");

    let missing = page
        .search_by_manufacturer_model("Juniper", "EX2300")
        .await
        .unwrap();
    assert!(missing.is_none());
}
