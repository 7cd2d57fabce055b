// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, response::Html};
use std::sync::Arc;

use crate::domain::repositories::audit_repository::AuditRepository;
use crate::presentation::errors::AppError;
use crate::presentation::views;

/// GET /history - all audits, newest first
pub async fn history_page(
    Extension(repository): Extension<Arc<dyn AuditRepository>>,
) -> Result<Html<String>, AppError> {
    let records = repository.list_recent().await?;
    Ok(Html(views::history_page(&records)))
}
