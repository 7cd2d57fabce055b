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
    extract::{Extension, Form},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::error;

use crate::domain::services::keyword_service::KeywordService;
use crate::presentation::views;

#[derive(Debug, Deserialize)]
pub struct KeywordForm {
    pub seed_keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportForm {
    pub data: Option<String>,
}

/// GET /keywords - the empty research form
pub async fn keywords_page() -> Html<String> {
    Html(views::keywords_page(None, None))
}

/// POST /keywords - run keyword research from the HTML form
pub async fn run_research(
    Extension(service): Extension<Arc<KeywordService>>,
    Form(form): Form<KeywordForm>,
) -> Html<String> {
    let seed = form
        .seed_keyword
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    if seed.is_empty() {
        return Html(views::keywords_page(
            None,
            Some("Please provide a seed keyword."),
        ));
    }

    match service.research(&seed).await {
        Ok(rows) => Html(views::keywords_page(Some(&rows), None)),
        Err(e) => {
            error!("Keyword research failed for '{}': {}", seed, e);
            Html(views::keywords_page(
                None,
                Some(&format!("Keyword research failed: {}", e)),
            ))
        }
    }
}

/// POST /keywords/export - form-encoded JSON rows back as a CSV attachment
pub async fn export_keywords(Form(form): Form<ExportForm>) -> Response {
    let Some(data) = form.data.filter(|d| !d.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "No data provided" })),
        )
            .into_response();
    };

    let rows: Vec<Map<String, Value>> = match serde_json::from_str(&data) {
        Ok(rows) => rows,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "Invalid JSON format" })),
            )
                .into_response();
        }
    };

    match render_csv(&rows) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"keywords.csv\"".to_string(),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Error in export_keywords: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "An error occurred while exporting data"
                })),
            )
                .into_response()
        }
    }
}

/// 把JSON行对象集合序列化为CSV
///
/// 列集合是各行键名的并集，按首次出现的顺序排列；
/// 字符串值按原文写出，其余值按JSON文本写出，null写成空串。
pub fn render_csv(rows: &[Map<String, Value>]) -> anyhow::Result<Vec<u8>> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if !columns.is_empty() {
        writer.write_record(&columns)?;
        for row in rows {
            let record: Vec<String> = columns
                .iter()
                .map(|column| match row.get(column) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect();
            writer.write_record(&record)?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer flush failed: {}", e))
}
