// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;

#[tokio::test]
async fn export_returns_header_plus_one_line_per_row() {
    let app = create_test_app().await;

    let rows = serde_json::json!([
        {
            "keyword": "rust",
            "search_volume": 42.5,
            "difficulty": 10.2,
            "average_trend": 40.0,
            "competitors": ["A", "B", "N/A"],
        },
        {
            "keyword": "axum",
            "search_volume": 12.0,
            "difficulty": 0,
            "average_trend": 11.0,
            "competitors": ["A", "B", "N/A"],
        },
    ]);

    let response = app
        .server
        .post("/keywords/export")
        .form(&[("data", rows.to_string())])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("disposition")
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("keywords.csv"));

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    // Every row key shows up in the header
    for column in [
        "keyword",
        "search_volume",
        "difficulty",
        "average_trend",
        "competitors",
    ] {
        assert!(lines[0].contains(column), "missing column {}", column);
    }
    assert!(lines[1].contains("rust") || lines[2].contains("rust"));
}

#[tokio::test]
async fn export_without_data_is_a_bad_request() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/keywords/export")
        .form(&[("data", "")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn export_with_malformed_json_is_a_bad_request() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/keywords/export")
        .form(&[("data", "{not json")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "Invalid JSON format");
}
