// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Form, Json},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::domain::models::audit::{AuditOutcome, SectionOutcome};
use crate::domain::services::audit_service::AuditService;
use crate::presentation::views;
use crate::utils::validators::validate_url;

#[derive(Debug, Deserialize)]
pub struct AuditForm {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequestDto {
    pub url: Option<String>,
}

/// GET /audit - the empty form
pub async fn audit_page() -> Html<String> {
    Html(views::audit_page(None, None))
}

/// POST /audit - run an audit from the HTML form
pub async fn run_audit(
    Extension(service): Extension<Arc<AuditService>>,
    Form(form): Form<AuditForm>,
) -> Html<String> {
    let url = form.url.unwrap_or_default();

    // Validation gates every network call
    if url.is_empty() || validate_url(&url).is_err() {
        return Html(views::audit_page(None, Some("A valid URL is required")));
    }

    match service.run_audit(&url).await {
        Ok(outcome) => Html(views::audit_page(Some(&outcome), None)),
        Err(e) => {
            error!("Audit failed for {}: {}", url, e);
            Html(views::audit_page(None, Some(&format!("Audit failed: {}", e))))
        }
    }
}

/// POST /v1/audit - the JSON variant
pub async fn api_audit(
    Extension(service): Extension<Arc<AuditService>>,
    Json(payload): Json<AuditRequestDto>,
) -> impl IntoResponse {
    let url = payload.url.unwrap_or_default();

    if url.is_empty() || validate_url(&url).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "A valid URL is required" })),
        )
            .into_response();
    }

    match service.run_audit(&url).await {
        Ok(outcome) => {
            let body = serde_json::json!({
                "url": outcome.url,
                "performance": outcome.performance,
                "seo": seo_projection(&outcome),
                "accessibility": accessibility_projection(&outcome),
                "report_download_link": format!(
                    "/download/{}",
                    views::report_basename(&outcome.report_path)
                ),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Audit failed for {}: {}", url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// SEO小节的线格式投影：失败时每个字段都是null，而不是"N/A"
fn seo_projection(outcome: &AuditOutcome) -> serde_json::Value {
    match &outcome.seo {
        SectionOutcome::Completed(seo) => serde_json::json!({
            "seo_title": seo.seo_title,
            "seo_meta_description": seo.seo_meta_description,
            "h1_tags": seo.h1_tags,
            "h2_tags": seo.h2_tags,
            "canonical_url": seo.canonical_url,
        }),
        SectionOutcome::Failed { .. } => serde_json::json!({
            "seo_title": null,
            "seo_meta_description": null,
            "h1_tags": null,
            "h2_tags": null,
            "canonical_url": null,
        }),
    }
}

/// 无障碍小节的线格式投影：失败时三项子计数为null、总数为0
fn accessibility_projection(outcome: &AuditOutcome) -> serde_json::Value {
    match &outcome.accessibility {
        SectionOutcome::Completed(a11y) => serde_json::json!({
            "missing_aria_roles": a11y.missing_aria_roles,
            "header_issues": a11y.header_issues,
            "missing_alt_attributes": a11y.missing_alt_attributes,
            "accessibility_issues": a11y.total_issues(),
        }),
        SectionOutcome::Failed { .. } => serde_json::json!({
            "missing_aria_roles": null,
            "header_issues": null,
            "missing_alt_attributes": null,
            "accessibility_issues": 0,
        }),
    }
}
