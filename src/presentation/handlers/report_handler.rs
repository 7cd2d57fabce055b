// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::warn;

use crate::config::settings::Settings;

/// GET /download/{filename} - serve a generated PDF as an attachment
pub async fn download_report(
    Path(filename): Path<String>,
    Extension(settings): Extension<Arc<Settings>>,
) -> impl IntoResponse {
    // Only bare file names are served out of the reports directory
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return (StatusCode::BAD_REQUEST, "Invalid report name").into_response();
    }

    let path = std::path::Path::new(&settings.audit.reports_dir).join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!("Report {} not readable: {}", filename, e);
            (StatusCode::NOT_FOUND, "Report not found").into_response()
        }
    }
}
