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

use crate::domain::models::audit::{AuditRecord, NewAuditRecord};
use crate::domain::repositories::audit_repository::{AuditRepository, RepositoryError};
use crate::infrastructure::database::entities::audit_history;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use std::sync::Arc;

/// 审计历史仓库实现
///
/// 基于SeaORM实现的审计历史数据访问层
#[derive(Clone)]
pub struct AuditRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AuditRepositoryImpl {
    /// 创建新的审计历史仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<audit_history::Model> for AuditRecord {
    fn from(model: audit_history::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            performance_score: model.performance_score,
            seo_title: model.seo_title,
            seo_meta_description: model.seo_meta_description,
            accessibility_issues: model.accessibility_issues,
            report_path: model.report_path,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl AuditRepository for AuditRepositoryImpl {
    async fn insert(&self, record: NewAuditRecord) -> Result<AuditRecord, RepositoryError> {
        let active = audit_history::ActiveModel {
            url: Set(record.url),
            performance_score: Set(record.performance_score),
            seo_title: Set(record.seo_title),
            seo_meta_description: Set(record.seo_meta_description),
            accessibility_issues: Set(record.accessibility_issues),
            report_path: Set(record.report_path),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn list_recent(&self) -> Result<Vec<AuditRecord>, RepositoryError> {
        let models = audit_history::Entity::find()
            .order_by_desc(audit_history::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(AuditRecord::from).collect())
    }
}
