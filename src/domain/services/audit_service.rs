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

use crate::audits::accessibility::audit_accessibility;
use crate::audits::fetcher::{FetchError, PageFetcher};
use crate::audits::performance::audit_performance;
use crate::audits::seo::audit_seo;
use crate::domain::models::audit::{AuditOutcome, NewAuditRecord};
use crate::domain::repositories::audit_repository::{AuditRepository, RepositoryError};
use crate::infrastructure::reports::pdf_writer::{PdfReportWriter, ReportError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// 审计流程错误类型
#[derive(Error, Debug)]
pub enum AuditError {
    /// 性能抓取失败。没有得分就没有记录，整个审计中止，
    /// 后续小节不再发起抓取
    #[error("Performance audit failed: {0}")]
    Performance(#[source] FetchError),
    /// 报告生成失败
    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),
    /// 记录持久化失败
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 审计服务
///
/// 串起一次完整审计：性能、SEO、无障碍三个小节依次执行，
/// 然后写PDF报告并追加历史记录。SEO与无障碍小节的失败只降级
/// 该小节，流程继续；性能小节失败则中止。
pub struct AuditService {
    fetcher: PageFetcher,
    report_writer: Arc<PdfReportWriter>,
    repository: Arc<dyn AuditRepository>,
}

impl AuditService {
    /// 创建新的审计服务实例
    pub fn new(
        fetcher: PageFetcher,
        report_writer: Arc<PdfReportWriter>,
        repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            fetcher,
            report_writer,
            repository,
        }
    }

    /// 执行一次完整审计
    ///
    /// 调用方必须先通过URL校验门；这里不再重复校验。
    pub async fn run_audit(&self, url: &str) -> Result<AuditOutcome, AuditError> {
        info!("Starting audit for {}", url);

        let performance = audit_performance(&self.fetcher, url)
            .await
            .map_err(AuditError::Performance)?;

        let seo = audit_seo(&self.fetcher, url).await;
        let accessibility = audit_accessibility(&self.fetcher, url).await;

        let report_path =
            self.report_writer
                .write_report(url, &performance, &seo, &accessibility)?;

        let outcome = AuditOutcome {
            url: url.to_string(),
            performance,
            seo,
            accessibility,
            report_path: report_path.clone(),
        };

        let record = NewAuditRecord {
            url: outcome.url.clone(),
            performance_score: outcome.performance.performance_score,
            seo_title: outcome.seo.completed().map(|s| s.seo_title.clone()),
            seo_meta_description: outcome
                .seo
                .completed()
                .map(|s| s.seo_meta_description.clone()),
            accessibility_issues: outcome.accessibility_issues_total() as i32,
            report_path,
        };
        self.repository.insert(record).await?;

        info!(
            "Audit completed for {} with score {}",
            url, outcome.performance.performance_score
        );
        Ok(outcome)
    }
}
