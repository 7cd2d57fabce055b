// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_PAGE: &str = r#"<html>
<head>
  <title>Test Page</title>
  <meta name="description" content="A page for audits">
  <link rel="canonical" href="https://example.com/canonical">
</head>
<body>
  <h1>Welcome</h1>
  <h3>Skipped level</h3>
  <img src="logo.png">
  <img src="hero.png" alt="hero">
</body>
</html>"#;

async fn mock_page(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn valid_url_audit_creates_one_record_and_a_pdf() {
    let app = create_test_app().await;
    let page = mock_page(200, SAMPLE_PAGE).await;
    let url = format!("{}/", page.uri());

    let response = app
        .server
        .post("/v1/audit")
        .json(&serde_json::json!({ "url": url }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["url"], url);
    assert_eq!(body["performance"]["status_code"], 200);
    // A local fetch stays under every threshold
    assert_eq!(body["performance"]["performance_score"], 100.0);
    assert_eq!(body["seo"]["seo_title"], "Test Page");
    assert_eq!(body["seo"]["seo_meta_description"], "A page for audits");
    assert_eq!(body["accessibility"]["header_issues"], 1);
    assert_eq!(body["accessibility"]["missing_alt_attributes"], 1);
    let link = body["report_download_link"].as_str().expect("link");
    assert!(link.starts_with("/download/"));

    // Exactly one history row with the matching URL
    let records = app.repository.list_recent().await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, url);
    assert_eq!(records[0].seo_title.as_deref(), Some("Test Page"));

    // The report file exists in the configured directory, is non-empty
    // and carries the PDF signature
    assert!(records[0]
        .report_path
        .starts_with(app.reports_dir.to_str().unwrap()));
    let bytes = std::fs::read(&records[0].report_path).expect("report file");
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..4], b"%PDF");
}

#[tokio::test]
async fn invalid_url_is_rejected_with_no_side_effects() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/audit")
        .json(&serde_json::json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("valid URL"));

    let records = app.repository.list_recent().await.expect("list");
    assert!(records.is_empty());
}

#[tokio::test]
async fn error_page_degrades_seo_and_accessibility_sections() {
    let app = create_test_app().await;
    // The performance fetch tolerates a 500; the strict sections do not
    let page = mock_page(500, "oops").await;
    let url = format!("{}/", page.uri());

    let response = app
        .server
        .post("/v1/audit")
        .json(&serde_json::json!({ "url": url }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["performance"]["status_code"], 500);

    // SEO failure projects to null fields, not "N/A"
    assert!(body["seo"]["seo_title"].is_null());
    assert!(body["seo"]["seo_meta_description"].is_null());
    assert!(body["seo"]["canonical_url"].is_null());

    // Accessibility failure projects to null sub-counts and a zero total
    assert!(body["accessibility"]["missing_aria_roles"].is_null());
    assert!(body["accessibility"]["header_issues"].is_null());
    assert!(body["accessibility"]["missing_alt_attributes"].is_null());
    assert_eq!(body["accessibility"]["accessibility_issues"], 0);

    // The audit still persisted what succeeded
    let records = app.repository.list_recent().await.expect("list");
    assert_eq!(records.len(), 1);
    assert!(records[0].seo_title.is_none());
    assert_eq!(records[0].accessibility_issues, 0);
}

#[tokio::test]
async fn unreachable_host_aborts_the_audit() {
    let app = create_test_app().await;

    // Nothing listens on port 1
    let response = app
        .server
        .post("/v1/audit")
        .json(&serde_json::json!({ "url": "http://127.0.0.1:1/" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Performance audit failed"));

    let records = app.repository.list_recent().await.expect("list");
    assert!(records.is_empty());
}

#[tokio::test]
async fn html_form_renders_results_and_validation_errors() {
    let app = create_test_app().await;
    let page = mock_page(200, SAMPLE_PAGE).await;
    let url = format!("{}/", page.uri());

    let response = app.server.post("/audit").form(&[("url", url.as_str())]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Results for"));
    assert!(html.contains("Download the PDF report"));

    let response = app
        .server
        .post("/audit")
        .form(&[("url", "not-a-url")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("A valid URL is required"));
}
