use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use worldpop::{config::Config, web};

fn app() -> Router {
    web::router(&Config::default()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn open_session() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/session")
        .body(Body::empty())
        .unwrap()
}

fn details_html(commands: &Value) -> String {
    commands
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["kind"] == "render_details")
        .and_then(|c| c["html"].as_str())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn page_assets_are_served() {
    let app = app();
    for (uri, content_type) in [
        ("/", "text/html"),
        ("/styles.css", "text/css"),
        ("/app.js", "application/javascript"),
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let served = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(served.starts_with(content_type), "{uri}: {served}");
    }
}

#[tokio::test]
async fn session_open_returns_slider_and_init_batch() {
    let (status, init) = send(&app(), open_session()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(init["session"].is_u64());
    assert_eq!(init["slider"]["minimum"], -1000);
    assert_eq!(init["slider"]["maximum"], 20_000_000_000_i64);
    let commands = init["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 17);
    assert_eq!(commands.last().unwrap()["kind"], "set_control_minimum");
}

#[tokio::test]
async fn slider_then_hover_round_trip() {
    let app = app();
    let (_, init) = send(&app, open_session()).await;
    let session = init["session"].as_u64().unwrap();

    let (status, commands) = send(
        &app,
        post_json(
            "/api/events",
            json!({ "session": session, "event": { "kind": "control_changed", "value": 16_000_000_000_i64 } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(commands
        .as_array()
        .unwrap()
        .contains(&json!({ "kind": "display_text", "element": "max-year-display", "text": "2087 CE" })));

    let (status, commands) = send(
        &app,
        post_json(
            "/api/events",
            json!({ "session": session, "event": { "kind": "hover_enter", "region": "asia" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let html = details_html(&commands);
    assert!(html.contains("1.65 liters"), "{html}");
    assert!(html.contains("0.80 kg"), "{html}");
}

#[tokio::test]
async fn tabs_do_not_share_slider_state() {
    let app = app();
    let (_, first) = send(&app, open_session()).await;
    let (_, second) = send(&app, open_session()).await;

    send(
        &app,
        post_json(
            "/api/events",
            json!({ "session": first["session"], "event": { "kind": "control_changed", "value": -1000 } }),
        ),
    )
    .await;
    let (_, commands) = send(
        &app,
        post_json(
            "/api/events",
            json!({ "session": second["session"], "event": { "kind": "hover_enter", "region": "asia" } }),
        ),
    )
    .await;
    let html = details_html(&commands);
    assert!(!html.contains("negative values"), "{html}");
    assert!(html.contains("4,800,000,000"), "{html}");
}

#[tokio::test]
async fn events_for_unknown_sessions_are_not_found() {
    let (status, _) = send(
        &app(),
        post_json(
            "/api/events",
            json!({ "session": 999, "event": { "kind": "hover_exit", "region": "asia" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn continents_report_clamps_negative_population() {
    let app = app();
    let (status, report) = send(&app, get("/api/continents?population=-5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_population"], 0);
    let continents = report["continents"].as_array().unwrap();
    assert_eq!(continents.len(), 6);
    assert!(continents.iter().all(|c| c["population"] == 0));
    assert!(continents.iter().all(|c| c["water_liters_per_day"].is_null()));

    let (_, report) = send(&app, get("/api/continents?population=16000000000")).await;
    assert_eq!(report["continents"][0]["continent"], "asia");
    assert_eq!(report["continents"][0]["population"], 9_600_000_000_i64);
    assert_eq!(report["continents"][0]["water_liters_per_day"], 1.65);
}

#[tokio::test]
async fn projection_handles_extreme_years() {
    let app = app();
    let (status, body) = send(&app, get("/api/projection?year=-300000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "year": -300000, "population": 1000 }));

    let (status, body) = send(&app, get(&format!("/api/projection?year={}", i64::MAX))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["population"], i64::MAX);

    let (status, body) = send(&app, get(&format!("/api/projection?year={}", i64::MIN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["population"], 0);

    // The server keeps answering afterwards.
    let (status, _) = send(&app, open_session()).await;
    assert_eq!(status, StatusCode::OK);
}
