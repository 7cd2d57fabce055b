// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use auditrs::audits::fetcher::PageFetcher;
use auditrs::config::settings::{
    AuditSettings, DatabaseSettings, KeywordSettings, ServerSettings, Settings,
};
use auditrs::domain::repositories::audit_repository::AuditRepository;
use auditrs::domain::search::competitors::{CompetitorError, CompetitorSource};
use auditrs::domain::services::audit_service::AuditService;
use auditrs::domain::services::keyword_service::KeywordService;
use auditrs::domain::trends::provider::{TrendsError, TrendsProvider};
use auditrs::infrastructure::database::connection;
use auditrs::infrastructure::reports::pdf_writer::PdfReportWriter;
use auditrs::infrastructure::repositories::audit_repo_impl::AuditRepositoryImpl;
use auditrs::infrastructure::search::results_page::ResultsPageClient;
use auditrs::presentation::routes;
use axum::Extension;
use migration::{Migrator, MigratorTrait};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// 测试应用及其外部句柄
pub struct TestApp {
    pub server: axum_test::TestServer,
    pub repository: Arc<dyn AuditRepository>,
    pub reports_dir: PathBuf,
    _tempdir: tempfile::TempDir,
}

/// 假趋势提供方：相关关键词与逐关键词序列都来自固定数据
pub struct FakeTrends {
    pub related: Vec<String>,
    pub series: HashMap<String, Vec<f64>>,
}

#[async_trait]
impl TrendsProvider for FakeTrends {
    async fn related_keywords(&self, _seed: &str) -> Result<Vec<String>, TrendsError> {
        Ok(self.related.clone())
    }

    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<f64>, TrendsError> {
        self.series
            .get(keyword)
            .cloned()
            .ok_or(TrendsError::Empty)
    }

    fn name(&self) -> &'static str {
        "fake-trends"
    }
}

/// 假竞争对手来源：返回固定标题
pub struct FakeCompetitors {
    pub names: Vec<String>,
}

#[async_trait]
impl CompetitorSource for FakeCompetitors {
    async fn top_competitors(
        &self,
        _seed: &str,
        slots: usize,
    ) -> Result<Vec<String>, CompetitorError> {
        Ok(self.names.iter().take(slots).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "fake-competitors"
    }
}

/// 构建只做审计的测试应用：关键词部分接空数据的替身
pub async fn create_test_app() -> TestApp {
    let trends = Arc::new(FakeTrends {
        related: Vec::new(),
        series: HashMap::new(),
    });
    let competitors = Arc::new(FakeCompetitors { names: Vec::new() });
    create_test_app_with(trends, competitors, "http://127.0.0.1:1").await
}

/// 构建带注入关键词依赖的测试应用
pub async fn create_test_app_with(
    trends: Arc<dyn TrendsProvider>,
    competitors: Arc<dyn CompetitorSource>,
    serp_base_url: &str,
) -> TestApp {
    let tempdir = tempfile::tempdir().expect("temp dir");
    let db_path = tempdir.path().join("audit_history.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let reports_dir = tempdir.path().join("reports");

    let settings = Arc::new(Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: db_url.clone(),
            max_connections: Some(5),
            min_connections: Some(1),
            connect_timeout: Some(5),
            idle_timeout: Some(60),
        },
        audit: AuditSettings {
            fetch_timeout: 5,
            reports_dir: reports_dir.display().to_string(),
            public_base_url: "http://127.0.0.1:3000".to_string(),
        },
        keywords: KeywordSettings {
            trends_base_url: "http://127.0.0.1:1".to_string(),
            search_base_url: serp_base_url.to_string(),
            browser_timeout: 5,
            trend_points: 12,
            competitor_slots: 3,
        },
    });

    let db = connection::create_pool(&settings.database)
        .await
        .expect("database pool");
    Migrator::up(&db, None).await.expect("migrations");
    let db = Arc::new(db);

    let repository: Arc<dyn AuditRepository> = Arc::new(AuditRepositoryImpl::new(db.clone()));

    let fetch_timeout = Duration::from_secs(settings.audit.fetch_timeout);
    let audit_service = Arc::new(AuditService::new(
        PageFetcher::new(fetch_timeout),
        Arc::new(PdfReportWriter::new(
            settings.audit.reports_dir.clone(),
            settings.audit.public_base_url.clone(),
        )),
        repository.clone(),
    ));

    let serp = Arc::new(ResultsPageClient::new(
        settings.keywords.search_base_url.clone(),
        fetch_timeout,
    ));
    let keyword_service = Arc::new(KeywordService::new(
        trends,
        serp,
        competitors,
        settings.keywords.trend_points,
        settings.keywords.competitor_slots,
    ));

    let app = routes::routes()
        .layer(Extension(audit_service))
        .layer(Extension(keyword_service))
        .layer(Extension(repository.clone()))
        .layer(Extension(settings));

    let server = axum_test::TestServer::new(app).expect("test server");

    TestApp {
        server,
        repository,
        reports_dir,
        _tempdir: tempdir,
    }
}
