// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use auditrs::domain::models::audit::NewAuditRecord;
use axum::http::StatusCode;

fn record(url: &str, score: f64) -> NewAuditRecord {
    NewAuditRecord {
        url: url.to_string(),
        performance_score: score,
        seo_title: Some("Title".to_string()),
        seo_meta_description: None,
        accessibility_issues: 2,
        report_path: "static/reports/Audit_Report_for_Example_by_Auditrs.pdf".to_string(),
    }
}

#[tokio::test]
async fn empty_history_renders_placeholder() {
    let app = create_test_app().await;

    let response = app.server.get("/history").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("No audits yet"));
}

#[tokio::test]
async fn history_lists_records_newest_first() {
    let app = create_test_app().await;
    app.repository
        .insert(record("https://first.example", 90.0))
        .await
        .expect("insert");
    app.repository
        .insert(record("https://second.example", 55.0))
        .await
        .expect("insert");

    // list_recent itself returns reverse insertion order
    let records = app.repository.list_recent().await.expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "https://second.example");
    assert_eq!(records[1].url, "https://first.example");

    let response = app.server.get("/history").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    let second_pos = html.find("https://second.example").expect("second row");
    let first_pos = html.find("https://first.example").expect("first row");
    assert!(second_pos < first_pos);
    assert!(html.contains("/download/Audit_Report_for_Example_by_Auditrs.pdf"));
}
