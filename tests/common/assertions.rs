//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response and return its message
///
/// Error bodies carry the HTTP status and a human-readable message.
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}. Full response: {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    json["error"]
        .as_str()
        .expect("Error response without message")
        .to_string()
}

/// Assert a single match in a /api/colors/match response
pub fn assert_matched(match_json: &serde_json::Value, source: &str, bead_id: &str) {
    assert_eq!(match_json["source_color"], source);
    assert_eq!(
        match_json["matched_id"], bead_id,
        "Unexpected bead for {source}: {match_json}"
    );
}
