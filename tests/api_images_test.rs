//! Integration tests for image upload and logical grid extraction.

mod common;

use axum::http::StatusCode;
use common::fixtures::{checkerboard_png, uniform_png, DARK, LIGHT};
use common::{assert_api_error, assert_ok, TestApp};
use pretty_assertions::assert_eq;
use serde_json::json;
use sha2::{Digest, Sha256};

fn rgb_json(c: [u8; 3]) -> serde_json::Value {
    json!({"r": c[0], "g": c[1], "b": c[2]})
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_png() {
    let app = TestApp::new();
    let bytes = checkerboard_png(8, 4);
    let expected_hash = hex::encode(Sha256::digest(&bytes));

    let response = app.post_bytes("/api/images/upload", bytes).await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["width"], 32);
    assert_eq!(json["height"], 32);
    assert_eq!(json["format"], "PNG");
    assert_eq!(json["message"], "Image uploaded successfully: 32x32");
    assert_eq!(json["image_hash"], expected_hash);
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images/upload", b"GIF? no, just text".to_vec())
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid image file");
}

#[tokio::test]
async fn test_upload_rejects_large_dimensions() {
    let app = TestApp::with_config("upload:\n  max_width: 16\n");

    let response = app
        .post_bytes("/api/images/upload", checkerboard_png(8, 4))
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Image too large (32x32). Maximum 16x2048 pixels.");
}

#[tokio::test]
async fn test_upload_rejects_oversized_body() {
    let app = TestApp::with_config("upload:\n  max_bytes: 100\n");

    let response = app
        .post_bytes("/api/images/upload", vec![0u8; 1000])
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Image file too large (max 100 bytes)");
}

// ============================================================================
// Extract
// ============================================================================

#[tokio::test]
async fn test_extract_detects_grid() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images/extract", checkerboard_png(8, 4))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["mode"], "grid");
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 4);
    assert_eq!(
        json["grid_info"],
        json!({
            "cell_width": 8,
            "cell_height": 8,
            "grid_cols": 4,
            "grid_rows": 4,
            "confidence": 0.9
        })
    );

    let grid = json["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 4);
    for (row, cells) in grid.iter().enumerate() {
        let cells = cells.as_array().unwrap();
        assert_eq!(cells.len(), 4);
        for (col, cell) in cells.iter().enumerate() {
            let expected = if (row + col) % 2 == 0 { LIGHT } else { DARK };
            assert_eq!(cell, &rgb_json(expected), "cell ({col}, {row})");
        }
    }
}

#[tokio::test]
async fn test_extract_auto_falls_back_to_direct() {
    let app = TestApp::new();
    let color = [120, 80, 200];

    let response = app
        .post_bytes("/api/images/extract", uniform_png(16, 12, color))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["mode"], "direct");
    assert_eq!(json["width"], 16);
    assert_eq!(json["height"], 12);
    assert!(json.get("grid_info").is_none());
    assert_eq!(json["grid"].as_array().unwrap().len(), 12);
    assert_eq!(json["grid"][11][15], rgb_json(color));
}

#[tokio::test]
async fn test_extract_direct_mode_skips_detection() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images/extract?mode=direct", checkerboard_png(8, 4))
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["mode"], "direct");
    assert_eq!(json["width"], 32);
    assert_eq!(json["height"], 32);
    assert_eq!(json["grid"][0][8], rgb_json(DARK));
}

#[tokio::test]
async fn test_extract_grid_mode_without_grid_is_422() {
    let app = TestApp::new();

    let response = app
        .post_bytes(
            "/api/images/extract?mode=grid",
            uniform_png(16, 12, [10, 200, 10]),
        )
        .await;
    let message = assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(message, "No pixel grid detected");
}

#[tokio::test]
async fn test_extract_rejects_invalid_cell_range() {
    let app = TestApp::new();

    let response = app
        .post_bytes(
            "/api/images/extract?min_cell_size=0",
            checkerboard_png(8, 4),
        )
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .post_bytes(
            "/api/images/extract?min_cell_size=20&max_cell_size=10",
            checkerboard_png(8, 4),
        )
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid cell size range: min 20, max 10");
}

#[tokio::test]
async fn test_extract_with_huge_cell_range_falls_back_to_direct() {
    let app = TestApp::new();

    let response = app
        .post_bytes(
            "/api/images/extract?min_cell_size=9223372036854775808&max_cell_size=18446744073709551615",
            checkerboard_png(8, 4),
        )
        .await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["mode"], "direct");
    assert_eq!(json["width"], 32);
    assert_eq!(json["height"], 32);
}

#[tokio::test]
async fn test_extract_rejects_unknown_mode() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images/extract?mode=magic", checkerboard_png(8, 4))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_rejects_grid_larger_than_board() {
    let app = TestApp::with_config("grid:\n  max_columns: 2\n");

    let response = app
        .post_bytes("/api/images/extract", checkerboard_png(8, 4))
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Pattern too large (4x4). Maximum 2x200 beads.");
}

#[tokio::test]
async fn test_extract_rejects_non_image() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images/extract", b"not an image".to_vec())
        .await;
    let message = assert_api_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid image file");
}
