// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app_with, FakeCompetitors, FakeTrends};
use axum::http::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERP_PAGE: &str =
    r#"<html><body><div id="result-stats">About 1,000,000 results (0.35 seconds)</div></body></html>"#;

async fn mock_serp() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SERP_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn research_builds_rows_for_every_related_keyword() {
    let serp = mock_serp().await;

    let mut series = HashMap::new();
    series.insert("rust web".to_string(), vec![40.0; 52]);
    // "rust api" has no trends data: every per-keyword lookup fails
    let trends = Arc::new(FakeTrends {
        related: vec!["rust web".to_string(), "rust api".to_string()],
        series,
    });
    let competitors = Arc::new(FakeCompetitors {
        names: vec!["Crates.io".to_string(), "Docs.rs".to_string()],
    });

    let app = create_test_app_with(trends, competitors, &serp.uri()).await;

    let response = app
        .server
        .post("/keywords")
        .form(&[("seed_keyword", "rust")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();

    // Both related keywords appear, in discovery order
    let web_pos = html.find("rust web").expect("rust web row");
    let api_pos = html.find("rust api").expect("rust api row");
    assert!(web_pos < api_pos);

    // Volume is the series mean; competitors pad to three slots
    assert!(html.contains("<td>40</td>"));
    assert!(html.contains("Crates.io; Docs.rs; N/A"));

    // difficulty = 0.4*log10(1e6) + 0.4*40 + 0.2*log10(1000) = 19.0
    assert!(html.contains("<td>19</td>"));

    // The failed keyword degrades to zeros instead of aborting the batch
    assert!(html.contains("<td>0</td>"));

    // The rendered batch is re-exportable
    assert!(html.contains(r#"action="/keywords/export""#));
}

#[tokio::test]
async fn missing_seed_keyword_is_rejected() {
    let serp = mock_serp().await;
    let trends = Arc::new(FakeTrends {
        related: Vec::new(),
        series: HashMap::new(),
    });
    let competitors = Arc::new(FakeCompetitors { names: Vec::new() });
    let app = create_test_app_with(trends, competitors, &serp.uri()).await;

    let response = app
        .server
        .post("/keywords")
        .form(&[("seed_keyword", "  ")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Please provide a seed keyword."));
}
