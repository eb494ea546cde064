//! Integration tests for the service and bead palette endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_api_error, assert_matched, assert_ok, TestApp};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert_ok(&response);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"message": "Beadsprite Helper API"})
    );

    let response = app.get("/health").await;
    assert_ok(&response);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"status": "healthy"})
    );
}

#[tokio::test]
async fn test_list_colors_in_palette_order() {
    let app = TestApp::new();

    let response = app.get("/api/colors/perler").await;
    assert_ok(&response);

    let colors: Vec<serde_json::Value> = response.json();
    assert_eq!(colors.len(), app.state.palette.len());
    assert_eq!(
        colors[0],
        json!({"id": "P01", "hex": "#F1F1F1", "name": "White"})
    );
    assert!(colors.iter().any(|c| c["id"] == "P92"));
}

#[tokio::test]
async fn test_get_color_by_id() {
    let app = TestApp::new();

    let response = app.get("/api/colors/perler/P05").await;
    assert_ok(&response);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"id": "P05", "hex": "#BF0A1E", "name": "Red"})
    );
}

#[tokio::test]
async fn test_get_unknown_color_is_404() {
    let app = TestApp::new();

    let response = app.get("/api/colors/perler/P99").await;
    let message = assert_api_error(&response, StatusCode::NOT_FOUND);
    assert_eq!(message, "Color P99 not found");
}

#[tokio::test]
async fn test_match_exact_palette_color() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/colors/match", &json!({"colors": ["#BF0A1E"]}))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["method"], "lab");
    assert_eq!(json["invalid_colors"], json!([]));
    assert_matched(&json["matches"][0], "#bf0a1e", "P05");
    assert_eq!(json["matches"][0]["distance"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_match_grey_prefers_grey_bead() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/colors/match", &json!({"colors": ["#808080"]}))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_matched(&json["matches"][0], "#808080", "P17");
}

#[tokio::test]
async fn test_match_reports_invalid_colors_without_failing() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/colors/match",
            &json!({"colors": ["#ZZZZZZ", "FFFFFF", "#12345"]}),
        )
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["matches"].as_array().unwrap().len(), 1);
    assert_matched(&json["matches"][0], "#ffffff", "P01");
    assert_eq!(json["invalid_colors"], json!(["#ZZZZZZ", "#12345"]));
}

#[tokio::test]
async fn test_match_large_batch_keeps_order() {
    let app = TestApp::new();
    let colors: Vec<&str> = ["#BF0A1E", "#808080", "#FFFFFF"]
        .into_iter()
        .cycle()
        .take(3000)
        .collect();

    let response = app
        .post_json("/api/colors/match", &json!({ "colors": colors }))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 3000);
    for (i, m) in matches.iter().enumerate() {
        let expected = ["P05", "P17", "P01"][i % 3];
        assert_eq!(m["matched_id"], expected, "match {i}");
    }
}

#[tokio::test]
async fn test_match_with_rgb_method() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/colors/match",
            &json!({"colors": ["#2E2F32"], "method": "rgb"}),
        )
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["method"], "rgb");
    assert_matched(&json["matches"][0], "#2e2f32", "P18");
}

#[tokio::test]
async fn test_match_restricted_to_candidates() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/colors/match",
            &json!({"colors": ["#FFFFFF"], "candidate_ids": ["P18"]}),
        )
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_matched(&json["matches"][0], "#ffffff", "P18");
}

#[tokio::test]
async fn test_match_with_no_candidates_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/colors/match",
            &json!({"colors": ["#FFFFFF"], "candidate_ids": ["NOPE"]}),
        )
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "no candidate colors to match against");
}

#[tokio::test]
async fn test_match_unknown_method_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/colors/match",
            &json!({"colors": ["#FFFFFF"], "method": "cmyk"}),
        )
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert!(message.contains("cmyk"), "Unexpected message: {message}");
}

#[tokio::test]
async fn test_match_malformed_body_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/colors/match", &json!({"colours": ["#FFFFFF"]}))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_default_method_from_config() {
    let app = TestApp::with_config("matching:\n  default_method: rgb\n");

    let response = app
        .post_json("/api/colors/match", &json!({"colors": ["#F1F1F1"]}))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["method"], "rgb");
    assert_matched(&json["matches"][0], "#f1f1f1", "P01");
}
