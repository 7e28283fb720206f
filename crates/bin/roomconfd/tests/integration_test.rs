//! End-to-end smoke tests for the full roomconfd stack.
//!
//! Each test wires the real file sink, the real service and the real axum
//! router, and exercises the HTTP layer via `tower::ServiceExt::oneshot`;
//! no TCP port is bound.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use roomconf_adapter_fs::{JsonFileSink, JsonFileSource};
use roomconf_adapter_http_axum::router;
use roomconf_adapter_http_axum::state::AppState;
use roomconf_app::services::configuration_service::ConfigurationService;
use tower::ServiceExt;

fn output_path(test: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("roomconfd-it-{}-{test}", std::process::id()))
        .join("room_configuration.json")
}

/// Build a fully-wired router exporting to `output`.
fn app(output: &Path) -> axum::Router {
    let service = ConfigurationService::new(JsonFileSink::new(output));
    router::build(AppState::new(service))
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

fn living_room() -> serde_json::Value {
    serde_json::json!({
        "devices": [
            {"name": "Light1", "type": "DIMMER", "min_level": 10, "room": "Living"},
            {"name": "Light2", "type": "dimmer"},
            {"name": "Blind", "type": "CURTAIN", "travel_time": 40},
            {"name": "Heating", "type": "THERMOSTAT", "min_temp": 16, "max_temp": 26}
        ],
        "groups": [
            {"name": "Living Room", "devices": "Light1, Light2"}
        ],
        "scenes": [
            {
                "name": "Movie",
                "target_1": "Living Room", "command_1": "SET_LEVEL", "value_1": 20,
                "target_2": "Blind", "command_2": "CLOSE",
                "target_3": "Heating", "command_3": "SET_TEMPERATURE", "value_3": "21.5"
            }
        ],
        "remoteControls": [
            {"name": "Sofa", "Button 1": "Movie", "button_2": "Living Room", "button_3": ""}
        ]
    })
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app(&output_path("health"))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_compile_complete_room() {
    let resp = app(&output_path("compile"))
        .oneshot(post_json("/api/compile", &living_room()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let document = &json["document"];
    assert_eq!(document["devices"].as_array().unwrap().len(), 4);
    assert_eq!(document["devices"][0]["attributes"]["min_level"], 10);
    assert_eq!(document["devices"][0]["attributes"]["room"], "Living");
    assert_eq!(
        document["scenes"][0]["actions"],
        serde_json::json!([
            {"target": "Living Room", "kind": "group", "command": "SET_LEVEL", "value": 20},
            {"target": "Blind", "kind": "device", "command": "CLOSE"},
            {"target": "Heating", "kind": "device", "command": "SET_TEMPERATURE", "value": 21.5}
        ])
    );
    assert_eq!(
        document["remoteControls"][0]["bindings"],
        serde_json::json!({
            "button_1": {"target": "Movie", "kind": "scene"},
            "button_2": {"target": "Living Room", "kind": "group"}
        })
    );
}

#[tokio::test]
async fn should_compile_group_members_given_as_list() {
    let body = serde_json::json!({
        "devices": [{"name": "Light1", "type": "DIMMER"}],
        "groups": [{"name": "Living Room", "members": ["Light1"]}]
    });

    let resp = app(&output_path("member-list"))
        .oneshot(post_json("/api/compile", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(
        json["document"]["groups"],
        serde_json::json!([{"name": "Living Room", "members": ["Light1"]}])
    );
    assert_eq!(json["document"]["remoteControls"], serde_json::json!([]));
}

#[tokio::test]
async fn should_report_duplicate_device_only() {
    let body = serde_json::json!({
        "devices": [
            {"name": "Light1", "type": "DIMMER"},
            {"name": "Light1", "type": "RELAY"}
        ],
        "groups": [{"name": "Hall", "devices": "Nowhere"}]
    });

    let resp = app(&output_path("duplicate"))
        .oneshot(post_json("/api/compile", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(resp).await;
    assert_eq!(json["errors"], serde_json::json!(["Light1: duplicate name"]));
    assert_eq!(json["details"][0]["section"], "devices");
}

#[tokio::test]
async fn should_report_missing_devices_section() {
    let body = serde_json::json!({"groups": []});

    let resp = app(&output_path("missing"))
        .oneshot(post_json("/api/compile", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(resp).await;
    assert_eq!(
        json["errors"],
        serde_json::json!(["devices: malformed section: section is missing"])
    );
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_export_same_document_as_compile_endpoint() {
    let output = output_path("export");

    let resp = app(&output)
        .oneshot(post_json("/api/configuration", &living_room()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let compiled = body_json(
        app(&output)
            .oneshot(post_json("/api/compile", &living_room()))
            .await
            .unwrap(),
    )
    .await;
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("{\n  \"devices\": [\n"));
    let written: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(written, compiled["document"]);
}

#[tokio::test]
async fn should_not_export_invalid_configuration() {
    let output = output_path("invalid");
    let body = serde_json::json!({
        "devices": [{"name": "Light1", "type": "DIMMER"}],
        "groups": [{"name": "Living Room", "members": "Light2"}]
    });

    let resp = app(&output)
        .oneshot(post_json("/api/configuration", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!output.exists());
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_publish_sections_read_from_file() {
    let output = output_path("from-file");
    let sections = output.with_file_name("sections.json");
    std::fs::create_dir_all(sections.parent().unwrap()).unwrap();
    std::fs::write(&sections, living_room().to_string()).unwrap();

    let service = ConfigurationService::new(JsonFileSink::new(&output));
    let submission = service
        .publish_from(&JsonFileSource::new(&sections))
        .await
        .unwrap();

    assert!(submission.success);
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["groups"][0]["members"], serde_json::json!(["Light1", "Light2"]));
}
