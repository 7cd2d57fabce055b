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

use auditrs::audits::fetcher::PageFetcher;
use auditrs::config::settings::Settings;
use auditrs::domain::repositories::audit_repository::AuditRepository;
use auditrs::domain::search::competitors::CompetitorSource;
use auditrs::domain::services::audit_service::AuditService;
use auditrs::domain::services::keyword_service::KeywordService;
use auditrs::domain::trends::provider::TrendsProvider;
use auditrs::infrastructure::browser::session::HeadlessCompetitorScraper;
use auditrs::infrastructure::database::connection;
use auditrs::infrastructure::reports::pdf_writer::PdfReportWriter;
use auditrs::infrastructure::repositories::audit_repo_impl::AuditRepositoryImpl;
use auditrs::infrastructure::search::results_page::ResultsPageClient;
use auditrs::infrastructure::trends::google_trends::GoogleTrendsClient;
use auditrs::presentation::routes;
use auditrs::utils::telemetry;
use axum::Extension;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting auditrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let repository: Arc<dyn AuditRepository> = Arc::new(AuditRepositoryImpl::new(db.clone()));

    let fetch_timeout = Duration::from_secs(settings.audit.fetch_timeout);
    let fetcher = PageFetcher::new(fetch_timeout);
    let report_writer = Arc::new(PdfReportWriter::new(
        settings.audit.reports_dir.clone(),
        settings.audit.public_base_url.clone(),
    ));
    let audit_service = Arc::new(AuditService::new(
        fetcher,
        report_writer,
        repository.clone(),
    ));

    let trends: Arc<dyn TrendsProvider> = Arc::new(GoogleTrendsClient::new(
        settings.keywords.trends_base_url.clone(),
        fetch_timeout,
    ));
    let serp = Arc::new(ResultsPageClient::new(
        settings.keywords.search_base_url.clone(),
        fetch_timeout,
    ));
    let competitors: Arc<dyn CompetitorSource> = Arc::new(HeadlessCompetitorScraper::new(
        settings.keywords.search_base_url.clone(),
        Duration::from_secs(settings.keywords.browser_timeout),
    ));
    let keyword_service = Arc::new(KeywordService::new(
        trends,
        serp,
        competitors,
        settings.keywords.trend_points,
        settings.keywords.competitor_slots,
    ));

    // 5. Start HTTP server
    let app = routes::routes()
        .layer(Extension(audit_service))
        .layer(Extension(keyword_service))
        .layer(Extension(repository))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
