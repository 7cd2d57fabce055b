// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{
    audit_handler, history_handler, keyword_handler, page_handler, report_handler,
};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let pages = Router::new()
        .route("/", get(page_handler::index))
        .route("/pricing", get(page_handler::pricing))
        .route("/contact", get(page_handler::contact))
        .route("/blog", get(page_handler::blog))
        .route("/testimonial", get(page_handler::testimonial))
        .route("/privacy_policy", get(page_handler::privacy_policy))
        .route("/terms_conditions", get(page_handler::terms_conditions))
        .route("/metrics_glossary", get(page_handler::metrics_glossary))
        .route("/authentication_form", get(page_handler::authentication_form))
        .route("/accessibility_check", get(page_handler::accessibility_check))
        .route("/performance_audit", get(page_handler::performance_audit))
        .route("/seo_analysis", get(page_handler::seo_analysis))
        .route("/404", get(page_handler::not_found));

    let audits = Router::new()
        .route(
            "/audit",
            get(audit_handler::audit_page).post(audit_handler::run_audit),
        )
        .route("/v1/audit", post(audit_handler::api_audit))
        .route("/history", get(history_handler::history_page))
        .route("/download/{filename}", get(report_handler::download_report));

    let keywords = Router::new()
        .route(
            "/keywords",
            get(keyword_handler::keywords_page).post(keyword_handler::run_research),
        )
        .route("/keywords/export", post(keyword_handler::export_keywords));

    Router::new()
        .merge(pages)
        .merge(audits)
        .merge(keywords)
        .route("/health", get(health_check))
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}
