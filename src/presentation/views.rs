// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Server-rendered HTML for the dynamic pages. The informational pages
//! live as static templates under `templates/` and bypass this module.

use crate::domain::models::audit::{AuditOutcome, AuditRecord};
use crate::domain::models::keyword::KeywordRecord;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Shared page shell with the site navigation.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Auditrs</title>
</head>
<body>
<nav>
  <a href="/">Home</a> |
  <a href="/audit">Audit</a> |
  <a href="/history">History</a> |
  <a href="/keywords">Keywords</a> |
  <a href="/pricing">Pricing</a> |
  <a href="/contact">Contact</a> |
  <a href="/metrics_glossary">Glossary</a>
</nav>
<hr>
{body}
</body>
</html>
"#,
        title = encode_text(title),
        body = body
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, encode_text(message)),
        None => String::new(),
    }
}

fn metric_row(label: &str, value: &str) -> String {
    format!(
        "<tr><th>{}</th><td>{}</td></tr>\n",
        encode_text(label),
        encode_text(value)
    )
}

/// The audit form page, optionally with one finished audit rendered.
pub fn audit_page(outcome: Option<&AuditOutcome>, error: Option<&str>) -> String {
    let mut body = String::from(
        r#"<h1>Website Audit</h1>
<form method="post" action="/audit">
  <label for="url">Website URL</label>
  <input type="text" id="url" name="url" placeholder="https://example.com">
  <button type="submit">Run audit</button>
</form>
"#,
    );
    body.push_str(&error_banner(error));

    if let Some(outcome) = outcome {
        body.push_str(&render_outcome(outcome));
    }

    layout("Audit", &body)
}

fn render_outcome(outcome: &AuditOutcome) -> String {
    let mut html = format!("<h2>Results for {}</h2>\n", encode_text(&outcome.url));

    html.push_str("<h3>Performance Metrics</h3>\n<table>\n");
    let p = &outcome.performance;
    html.push_str(&metric_row("Status Code", &p.status_code.to_string()));
    html.push_str(&metric_row("Content Size", &p.content_size));
    html.push_str(&metric_row(
        "Performance Score",
        &p.performance_score.to_string(),
    ));
    html.push_str(&metric_row("First Contentful Paint", &p.first_contentful_paint));
    html.push_str(&metric_row("Speed Index", &p.speed_index));
    html.push_str(&metric_row(
        "Largest Contentful Paint",
        &p.largest_contentful_paint,
    ));
    html.push_str(&metric_row("Time To Interactive", &p.time_to_interactive));
    html.push_str(&metric_row("Total Blocking Time", &p.total_blocking_time));
    html.push_str("</table>\n");

    html.push_str("<h3>SEO Metrics</h3>\n");
    match outcome.seo.completed() {
        Some(seo) => {
            html.push_str("<table>\n");
            html.push_str(&metric_row("Seo Title", &seo.seo_title));
            html.push_str(&metric_row("Seo Meta Description", &seo.seo_meta_description));
            html.push_str(&metric_row("H1 Tags", &seo.h1_tags.join(", ")));
            html.push_str(&metric_row("H2 Tags", &seo.h2_tags.join(", ")));
            html.push_str(&metric_row("Canonical Url", &seo.canonical_url));
            html.push_str("</table>\n");
        }
        None => html.push_str("<p>SEO audit unavailable for this page.</p>\n"),
    }

    html.push_str("<h3>Accessibility Metrics</h3>\n");
    match outcome.accessibility.completed() {
        Some(a11y) => {
            html.push_str("<table>\n");
            html.push_str(&metric_row(
                "Missing Aria Roles",
                &a11y.missing_aria_roles.to_string(),
            ));
            html.push_str(&metric_row("Header Issues", &a11y.header_issues.to_string()));
            html.push_str(&metric_row(
                "Missing Alt Attributes",
                &a11y.missing_alt_attributes.to_string(),
            ));
            html.push_str(&metric_row(
                "Accessibility Issues",
                &a11y.total_issues().to_string(),
            ));
            html.push_str("</table>\n");
        }
        None => html.push_str("<p>Accessibility audit unavailable for this page.</p>\n"),
    }

    html.push_str(&format!(
        r#"<p><a href="/download/{}">Download the PDF report</a></p>
"#,
        encode_double_quoted_attribute(report_basename(&outcome.report_path))
    ));

    html
}

/// File name component of a stored report path.
pub fn report_basename(report_path: &str) -> &str {
    std::path::Path::new(report_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(report_path)
}

/// The audit history table, newest first.
pub fn history_page(records: &[AuditRecord]) -> String {
    let mut body = String::from("<h1>Audit History</h1>\n");

    if records.is_empty() {
        body.push_str("<p>No audits yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>URL</th><th>Score</th><th>Title</th><th>Issues</th><th>Date</th><th>Report</th></tr>\n",
        );
        for record in records {
            body.push_str(&format!(
                r#"<tr><td>{url}</td><td>{score}</td><td>{title}</td><td>{issues}</td><td>{date}</td><td><a href="/download/{report}">PDF</a></td></tr>
"#,
                url = encode_text(&record.url),
                score = record.performance_score,
                title = encode_text(record.seo_title.as_deref().unwrap_or("-")),
                issues = record.accessibility_issues,
                date = record.created_at.format("%Y-%m-%d %H:%M"),
                report = encode_double_quoted_attribute(report_basename(&record.report_path)),
            ));
        }
        body.push_str("</table>\n");
    }

    layout("History", &body)
}

/// The keyword research page, optionally with one finished batch.
pub fn keywords_page(rows: Option<&[KeywordRecord]>, error: Option<&str>) -> String {
    let mut body = String::from(
        r#"<h1>Keyword Research</h1>
<form method="post" action="/keywords">
  <label for="seed_keyword">Seed keyword</label>
  <input type="text" id="seed_keyword" name="seed_keyword" placeholder="rust web framework">
  <button type="submit">Research</button>
</form>
"#,
    );
    body.push_str(&error_banner(error));

    if let Some(rows) = rows {
        body.push_str(
            "<table>\n<tr><th>Keyword</th><th>Search Volume</th><th>Difficulty</th><th>Average Trend</th><th>Competitors</th></tr>\n",
        );
        for row in rows {
            body.push_str(&format!(
                "<tr><td>{keyword}</td><td>{volume}</td><td>{difficulty}</td><td>{trend}</td><td>{competitors}</td></tr>\n",
                keyword = encode_text(&row.keyword),
                volume = row.search_volume,
                difficulty = row.difficulty,
                trend = row.average_trend,
                competitors = encode_text(&row.competitors.join("; ")),
            ));
        }
        body.push_str("</table>\n");

        // The rendered batch rides along as JSON so the export endpoint
        // can rebuild the exact rows without any server-side state
        if let Ok(json) = serde_json::to_string(rows) {
            body.push_str(&format!(
                r#"<form method="post" action="/keywords/export">
  <input type="hidden" name="data" value="{}">
  <button type="submit">Export CSV</button>
</form>
"#,
                encode_double_quoted_attribute(&json)
            ));
        }
    }

    layout("Keywords", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_basename_strips_directories() {
        assert_eq!(
            report_basename("static/reports/Audit_Report_for_Example_by_Auditrs.pdf"),
            "Audit_Report_for_Example_by_Auditrs.pdf"
        );
    }

    #[test]
    fn history_page_escapes_urls() {
        let records = vec![AuditRecord {
            id: 1,
            url: "https://example.com/<script>".to_string(),
            performance_score: 85.0,
            seo_title: None,
            seo_meta_description: None,
            accessibility_issues: 0,
            report_path: "static/reports/x.pdf".to_string(),
            created_at: chrono::Utc::now(),
        }];
        let html = history_page(&records);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
